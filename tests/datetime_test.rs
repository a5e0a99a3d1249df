#![allow(clippy::expect_used)]

use mf2_parser::{parse, Item};

fn event(body: &str) -> Item {
    let html = format!(r#"<div class="h-event"><span class="p-name">E</span>{body}</div>"#);
    parse(&html).expect("parse failed").items.remove(0)
}

#[test]
fn value_class_date_and_time() {
    let item = event(
        r#"<span class="dt-start"><span class="value">2012-10-07</span> at <span class="value">21:18</span></span>"#,
    );
    assert_eq!(item.first_str("start"), Some("2012-10-07T21:18"));
}

#[test]
fn value_title_and_abbr_parts() {
    let item = event(
        r#"<span class="dt-start"><span class="value-title" title="2012-10-07"></span><abbr class="value" title="21:18:30">9pm</abbr></span>"#,
    );
    assert_eq!(item.first_str("start"), Some("2012-10-07T21:18:30"));
}

#[test]
fn time_element_datetime_attribute() {
    let item = event(r#"<time class="dt-start" datetime="2014-01-01T10:00:00Z">New Year</time>"#);
    assert_eq!(item.first_str("start"), Some("2014-01-01T10:00:00Z"));
}

#[test]
fn time_only_end_takes_start_date_and_timezone() {
    let item = event(
        r#"<time class="dt-start" datetime="2014-06-01T12:30:00-0700">noon</time>
           <span class="dt-end">13:30</span>"#,
    );
    assert_eq!(item.first_str("start"), Some("2014-06-01T12:30:00-0700"));
    assert_eq!(item.first_str("end"), Some("2014-06-01T13:30-0700"));
}

#[test]
fn value_class_timezone_is_implied_for_other_properties() {
    let item = event(
        r#"<span class="dt-start"><span class="value">2020-02-02</span><span class="value">9:00am</span><span class="value">+01:00</span></span>
           <span class="dt-end"><span class="value">2020-02-02</span><span class="value">5pm</span></span>"#,
    );
    assert_eq!(item.first_str("start"), Some("2020-02-02T09:00+0100"));
    assert_eq!(item.first_str("end"), Some("2020-02-02T17:00+0100"));
}

#[test]
fn twelve_am_is_midnight() {
    let item = event(
        r#"<span class="dt-start"><span class="value">2020-02-02</span><span class="value">12:15am</span></span>"#,
    );
    assert_eq!(item.first_str("start"), Some("2020-02-02T00:15"));
}

#[test]
fn ordinal_date_normalized() {
    let item = event(r#"<span class="dt-start"><span class="value">2016-032</span></span>"#);
    assert_eq!(item.first_str("start"), Some("2016-02-01"));
}

#[test]
fn empty_datetime_property_is_omitted() {
    let item = event(r#"<span class="dt-start"></span><span class="dt-end"><span class="value"></span></span>"#);
    assert!(item.get("start").is_none());
    assert!(item.get("end").is_none());
}

#[test]
fn dates_are_not_shared_between_items() {
    let html = r#"
        <div class="h-event"><p class="p-name">A</p><time class="dt-start" datetime="2001-01-01">x</time></div>
        <div class="h-event"><p class="p-name">B</p><span class="dt-start">10:00</span></div>"#;
    let result = parse(html).expect("parse failed");

    assert_eq!(result.items[0].first_str("start"), Some("2001-01-01"));
    assert_eq!(result.items[1].first_str("start"), Some("10:00"));
}

#[test]
fn single_digit_offset_is_not_doubled() {
    let item = event(
        r#"<time class="dt-start" datetime="2012-10-07T21:00-8">9pm</time>
           <span class="dt-end"><span class="value">2012-10-07</span><span class="value">23:00</span><span class="value">-0700</span></span>"#,
    );
    assert_eq!(item.first_str("start"), Some("2012-10-07T21:00-8"));
    assert_eq!(item.first_str("end"), Some("2012-10-07T23:00-0700"));
}
