use super::*;

#[test]
fn test_buffer_collects_lines() {
    let output = buffer_output();
    output.write_line("one");
    output.write_line("two");

    assert_eq!(output.captured(), "one\ntwo\n");
}

#[test]
fn test_clear_empties_buffer() {
    let output = buffer_output();
    output.write_line("gone");
    output.clear();

    assert!(output.captured().is_empty());
}

#[test]
fn test_silent_and_stdout_capture_nothing() {
    let silent = silent_output();
    silent.write_line("dropped");
    assert_eq!(silent.captured(), "");

    assert_eq!(stdout_output().captured(), "");
}

#[test]
fn test_shared_handles_see_same_buffer() {
    let output = buffer_output();
    let alias = Arc::clone(&output);
    alias.write_line("via alias");

    assert_eq!(output.captured(), "via alias\n");
}
