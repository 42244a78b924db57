use super::*;

/// Monospace stand-in: every char is 10 units wide.
fn mono(s: &str) -> f64 {
    s.chars().count() as f64 * 10.0
}

fn words_of(lines: &[String]) -> Vec<String> {
    lines
        .join(" ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[test]
fn short_text_stays_on_one_line() {
    assert_eq!(wrap_text("HELLO WORLD", 500.0, &mut mono), vec!["HELLO WORLD"]);
}

#[test]
fn empty_and_blank_inputs_yield_one_line() {
    assert_eq!(wrap_text("", 100.0, &mut mono), vec![""]);
    assert_eq!(wrap_text("   ", 100.0, &mut mono), vec!["   "]);
}

#[test]
fn equality_keeps_accumulating() {
    // "AB CD" is exactly 50 wide.
    assert_eq!(wrap_text("AB CD", 50.0, &mut mono), vec!["AB CD"]);
    assert_eq!(wrap_text("AB CD", 49.0, &mut mono), vec!["AB", "CD"]);
}

#[test]
fn overlong_single_word_gets_its_own_line() {
    let lines = wrap_text("A SUPERCALIFRAGILISTIC B", 60.0, &mut mono);
    assert_eq!(lines, vec!["A", "SUPERCALIFRAGILISTIC", "B"]);

    let lines = wrap_text("SUPERCALIFRAGILISTIC", 10.0, &mut mono);
    assert_eq!(lines, vec!["SUPERCALIFRAGILISTIC"]);
}

#[test]
fn runs_of_whitespace_collapse_to_single_spaces() {
    let lines = wrap_text("  ONE \t TWO\nTHREE  ", 1000.0, &mut mono);
    assert_eq!(lines, vec!["ONE TWO THREE"]);
}

#[test]
fn long_caption_wraps_into_several_lines_within_limit() {
    let text = "This is a very long caption that must wrap across multiple lines".to_uppercase();
    let max = 150.0;
    let lines = wrap_text(&text, max, &mut mono);
    assert!(lines.len() >= 3, "{lines:?}");
    for line in &lines {
        let single_word = !line.contains(' ');
        assert!(mono(line) <= max || single_word, "{line:?} overflows");
    }
    assert_eq!(words_of(&lines), words_of(&[text]));
}

#[test]
fn greedy_lines_are_maximal() {
    let text = "a bb ccc dddd eeeee ffffff g hh iii jjjj kkkkk llllll mmmmmmm n";
    for max in [10.0, 25.0, 40.0, 55.0, 80.0, 130.0, 1000.0] {
        let lines = wrap_text(text, max, &mut mono);
        assert!(!lines.is_empty());
        assert_eq!(words_of(&lines), words_of(&[text.to_string()]));
        for pair in lines.windows(2) {
            let next_word = pair[1].split(' ').next().unwrap();
            let extended = format!("{} {next_word}", pair[0]);
            assert!(
                mono(&extended) > max,
                "max={max}: {:?} could also hold {next_word:?}",
                pair[0]
            );
        }
    }
}

#[test]
fn measure_sees_candidate_lines_only() {
    let mut seen = Vec::new();
    let mut spy = |s: &str| {
        seen.push(s.to_string());
        mono(s)
    };
    let lines = wrap_text("AA BB CC", 50.0, &mut spy);
    assert_eq!(lines, vec!["AA BB", "CC"]);
    assert_eq!(seen, vec!["AA BB", "AA BB CC"]);
}
