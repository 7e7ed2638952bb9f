use expect_test::{expect, Expect};

use super::*;

fn check_tokens(input: &str, expect: Expect) {
    let rendered = match lex(input) {
        Ok(tokens) => tokens
            .iter()
            .map(|token| format!("{} {:?}\n", token.location(), token.kind))
            .collect::<String>(),
        Err(err) => format!("error at {}: {}\n", err.location(), err),
    };
    expect.assert_eq(&rendered);
}

#[test]
fn lex_header_and_directive_lines() {
    check_tokens(
        "Name: Test\nSteadyState\nDuration: 10m\nPower: 75%\n",
        expect![[r#"
            1:1 Header(Name)
            1:7 Text("Test")
            2:1 IntervalLabel(SteadyState)
            3:11 Duration(Duration { seconds: 600 })
            4:8 Intensity(0.75)
        "#]],
    );
}

#[test]
fn lex_inline_parameters() {
    check_tokens(
        "Warmup: 10:00 50%..75% 85rpm",
        expect![[r#"
            1:1 IntervalLabel(Warmup)
            1:9 Duration(Duration { seconds: 600 })
            1:15 IntensityRange(0.5, 0.75)
            1:24 Cadence(85)
        "#]],
    );
}

#[test]
fn lex_power_forms() {
    check_tokens(
        "Interval: 30s 300W\nRest: 15s ->50%\nCooldown: 5m 0.6-0.4\nFreeRide: 20m",
        expect![[r#"
            1:1 IntervalLabel(Interval)
            1:11 Duration(Duration { seconds: 30 })
            1:15 Watts(300)
            2:1 IntervalLabel(Rest)
            2:7 Duration(Duration { seconds: 15 })
            2:11 IntensityRangeEnd(0.5)
            3:1 IntervalLabel(Cooldown)
            3:11 Duration(Duration { seconds: 300 })
            3:14 IntensityRange(0.6, 0.4)
            4:1 IntervalLabel(FreeRide)
            4:11 Duration(Duration { seconds: 1200 })
        "#]],
    );
}

#[test]
fn lex_comments_with_offset_kinds() {
    check_tokens(
        "SteadyState: 1m\n  @0 Start\n  @+10s \"Keep going\"\n  @-10s Go!\n",
        expect![[r#"
            1:1 IntervalLabel(SteadyState)
            1:14 Duration(Duration { seconds: 60 })
            2:3 CommentStart
            2:4 Offset(Absolute, Duration { seconds: 0 })
            2:6 Text("Start")
            3:3 CommentStart
            3:4 Offset(RelativePlus, Duration { seconds: 10 })
            3:9 Text("Keep going")
            4:3 CommentStart
            4:4 Offset(RelativeMinus, Duration { seconds: 10 })
            4:9 Text("Go!")
        "#]],
    );
}

#[test]
fn lex_comment_without_offset_or_text() {
    check_tokens(
        "@ Go!\n@1:30\n@10 \"\"",
        expect![[r#"
            1:1 CommentStart
            1:3 Text("Go!")
            2:1 CommentStart
            2:2 Offset(Absolute, Duration { seconds: 90 })
            3:1 CommentStart
            3:2 Offset(Absolute, Duration { seconds: 10 })
        "#]],
    );
}

#[test]
fn lex_keeps_blank_lines_and_free_text() {
    check_tokens(
        "Description: First line\n\n  more text\nTags: a, b",
        expect![[r#"
            1:1 Header(Description)
            1:14 Text("First line")
            2:1 Text("")
            3:3 Text("more text")
            4:1 Header(Tags)
            4:7 Text("a, b")
        "#]],
    );
}

#[test]
fn lex_label_words_inside_prose_are_text() {
    check_tokens(
        "Interval training is fun\nWarmup   \nName without colon",
        expect![[r#"
            1:1 Text("Interval training is fun")
            2:1 IntervalLabel(Warmup)
            3:1 Text("Name without colon")
        "#]],
    );
}

#[test]
fn lex_crlf_line_endings() {
    check_tokens(
        "Warmup\r\nCadence: 90rpm\r\n",
        expect![[r#"
            1:1 IntervalLabel(Warmup)
            2:10 Cadence(90)
        "#]],
    );
}

#[test]
fn lex_unrecognized_parameter() {
    check_tokens(
        "Interval: 10x",
        expect![[r#"
            error at 1:11: Unrecognized interval parameter '10x'
        "#]],
    );
}

#[test]
fn lex_bare_integer_power_is_rejected() {
    check_tokens(
        "Power: 75",
        expect![[r#"
            error at 1:8: Invalid power '75'
        "#]],
    );
}

#[test]
fn lex_bad_watts() {
    check_tokens(
        "Rest: 10m abcW",
        expect![[r#"
            error at 1:11: Invalid power 'abcW'
        "#]],
    );
}

#[test]
fn lex_directive_without_value() {
    check_tokens(
        "Duration:",
        expect![[r#"
            error at 1:10: Missing value after 'Duration:'
        "#]],
    );
}

#[test]
fn lex_directive_with_extra_words() {
    check_tokens(
        "Duration: 10m 5s",
        expect![[r#"
            error at 1:15: Unexpected input '5s'
        "#]],
    );
}

#[test]
fn lex_bad_cadence() {
    check_tokens(
        "Cadence: fast",
        expect![[r#"
            error at 1:10: Invalid cadence 'fast'
        "#]],
    );
}

#[test]
fn lex_malformed_offset() {
    check_tokens(
        "  @+1x text",
        expect![[r#"
            error at 1:4: Invalid comment offset '+1x'
        "#]],
    );
}

#[test]
fn lex_unterminated_comment() {
    check_tokens(
        "@10 \"unterminated",
        expect![[r#"
            error at 1:5: Unterminated comment text
        "#]],
    );
}

#[test]
fn lex_text_after_quoted_comment() {
    check_tokens(
        "@10 \"Go\" now",
        expect![[r#"
            error at 1:10: Unexpected input 'now'
        "#]],
    );
}

#[test]
fn lex_spans_cover_the_literal() {
    let tokens = lex("Interval: 2m30s").unwrap();
    assert_eq!(tokens[1].span, Span::new(SourceLocation::new(1, 11), SourceLocation::new(1, 16)));
}

#[test]
fn lex_empty_input() {
    assert_eq!(lex("").unwrap(), Vec::new());
}
