use super::*;

// -----------------------------------------------------------------------
// extract_from_text
// -----------------------------------------------------------------------

#[test]
fn open_until_beats_closed_marker() {
    let signal = extract_from_text("Closed on Mondays. Open until 21:00 today", None).unwrap();
    assert_eq!(signal.state, OpenState::Open);
    assert_eq!(signal.open_until.as_deref(), Some("21:00"));
    assert_eq!(signal.message.as_deref(), Some("open until 21:00"));
    assert_eq!(signal.source, SignalSource::Text);
}

#[test]
fn thai_open_until() {
    let signal = extract_from_text("ร้านนี้ เปิดอยู่ · จนถึง 22:30", None).unwrap();
    assert_eq!(signal.state, OpenState::Open);
    assert_eq!(signal.open_until.as_deref(), Some("22:30"));
}

#[test]
fn open_without_time_does_not_count() {
    // "open" alone is not evidence; the closed marker decides.
    let signal = extract_from_text("Open now · Closed on holidays", None).unwrap();
    assert_eq!(signal.state, OpenState::Closed);
}

#[test]
fn later_open_with_time_is_found() {
    let signal = extract_from_text("Open daily. Open until 9:30", None).unwrap();
    assert_eq!(signal.open_until.as_deref(), Some("9:30"));
}

#[test]
fn closing_soon_without_time() {
    let signal = extract_from_text("Closing soon", None).unwrap();
    assert_eq!(signal.state, OpenState::ClosingSoon);
    assert!(signal.open_until.is_none());
    assert_eq!(signal.message.as_deref(), Some("closing soon"));
}

#[test]
fn closing_soon_with_time() {
    let signal = extract_from_text("ใกล้ปิด 20:00", None).unwrap();
    assert_eq!(signal.state, OpenState::ClosingSoon);
    assert_eq!(signal.open_until.as_deref(), Some("20:00"));
    assert_eq!(
        signal.message.as_deref(),
        Some("closing soon, open until 20:00")
    );
}

#[test]
fn closing_soon_beats_closed() {
    let signal = extract_from_text("กำลังจะปิด ... ปิดแล้ว", None).unwrap();
    assert_eq!(signal.state, OpenState::ClosingSoon);
}

#[test]
fn thai_closed() {
    let signal = extract_from_text("สถานะ: ปิดแล้ว", None).unwrap();
    assert_eq!(signal.state, OpenState::Closed);
    assert_eq!(signal.message.as_deref(), Some("closed"));
    assert!(signal.open_until.is_none());
}

#[test]
fn thai_open_is_not_read_as_closed() {
    // "เปิดอยู่" contains "ปิดอยู่".
    assert!(extract_from_text("เปิดอยู่", None).is_none());
}

#[test]
fn closed_needs_a_whole_word() {
    assert!(extract_from_text("enclosed patio", None).is_none());
}

#[test]
fn no_markers_is_not_found() {
    assert!(extract_from_text("Best khao soi in town", Some("Khao Soi".to_owned())).is_none());
}

#[test]
fn heading_is_carried_as_name() {
    let signal = extract_from_text("closed", Some("Baan Ice".to_owned())).unwrap();
    assert_eq!(signal.name.as_deref(), Some("Baan Ice"));
}

// -----------------------------------------------------------------------
// extract_from_html
// -----------------------------------------------------------------------

#[test]
fn html_uses_first_heading_and_visible_text() {
    let body = r"<html><head><title>x</title></head><body>
        <h1>
            Jok Prince
        </h1>
        <h1>Second Heading</h1>
        <div><span>Open</span> <span>until</span> <span>23:00</span></div>
    </body></html>";
    let signal = extract_from_html(body).unwrap();
    assert_eq!(signal.name.as_deref(), Some("Jok Prince"));
    assert_eq!(signal.state, OpenState::Open);
    assert_eq!(signal.open_until.as_deref(), Some("23:00"));
}

#[test]
fn html_ignores_script_and_style_text() {
    let body = r#"<html><head><style>.closed { color: red }</style></head><body>
        <h1>Pad Thai Thip</h1>
        <script>var label = "closed";</script>
        <p>Reviews</p>
    </body></html>"#;
    assert!(extract_from_html(body).is_none());
}

#[test]
fn html_without_heading_has_no_name() {
    let body = "<html><body><p>Closed</p></body></html>";
    let signal = extract_from_html(body).unwrap();
    assert!(signal.name.is_none());
    assert_eq!(signal.state, OpenState::Closed);
}

#[test]
fn empty_heading_is_ignored() {
    let body = "<html><body><h1>   </h1><p>Closing soon</p></body></html>";
    let signal = extract_from_html(body).unwrap();
    assert!(signal.name.is_none());
    assert_eq!(signal.state, OpenState::ClosingSoon);
}

#[test]
fn html_ignores_head_text() {
    let body = "<html><head><title>Jay Fai - Open until 21:00</title></head>\
                <body><h1>Jay Fai</h1><p>ปิดแล้ว</p></body></html>";
    let signal = extract_from_html(body).unwrap();
    assert_eq!(signal.state, OpenState::Closed);
    assert!(signal.open_until.is_none());
    assert_eq!(signal.name.as_deref(), Some("Jay Fai"));
}

#[test]
fn html_title_alone_is_not_a_status() {
    let body = "<html><head><title>Closed for renovation</title></head>\
                <body><h1>Somtum Der</h1><p>Menu</p></body></html>";
    assert!(extract_from_html(body).is_none());
}
