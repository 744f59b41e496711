use super::*;

#[test]
fn status_line_covers_each_probe_state() {
    assert_eq!(status_line(None).0, "status status--pending");
    assert_eq!(status_line(Some(Ok("healthy".into()))).1, "Service healthy");
    let (class, text) = status_line(Some(Err("network error: refused".into())));
    assert_eq!(class, "status status--down");
    assert!(text.ends_with("refused"));
}
