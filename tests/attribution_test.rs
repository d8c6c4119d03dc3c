use email_blocks::*;

#[test]
fn test_gmail_attribution() {
    let attribution = parse_attribution(
        "On Tue, Feb 17, 2026 at 11:37 AM Niko Cunningham <niko@rumilabs.io> wrote:",
    )
    .unwrap();

    assert_eq!(attribution.name, "Niko Cunningham");
    assert_eq!(attribution.initials, "NC");
}

#[test]
fn test_attribution_short_date() {
    let attribution =
        parse_attribution("On Mon, Jan 5, 2026 at 9:00 AM Bob Lee <bob@co.com> wrote:").unwrap();
    assert_eq!(attribution.name, "Bob Lee");
    assert_eq!(attribution.initials, "BL");
}

#[test]
fn test_attribution_ordinal_day() {
    let attribution =
        parse_attribution("On Tue, Feb 17th, 2026 at 11:37 AM Bob Lee <bob@co.com> wrote:")
            .unwrap();
    assert_eq!(attribution.name, "Bob Lee");
    assert_eq!(attribution.initials, "BL");
}

#[test]
fn test_attribution_spelled_out_date() {
    let attribution = parse_attribution(
        "On the 17 of February 2026 at 11:37 AM Bob Lee <bob@co.com> wrote:",
    )
    .unwrap();
    assert_eq!(attribution.name, "Bob Lee");
    assert_eq!(attribution.initials, "BL");
}

#[test]
fn test_attribution_name_ending_in_month_word_uses_local_part() {
    let attribution =
        parse_attribution("On Friday, May 1, 2026 at 3:00 PM Mark May <mark@x.com> wrote:")
            .unwrap();
    assert_eq!(attribution.name, "mark");
    assert_eq!(attribution.initials, "MA");
}

#[test]
fn test_attribution_numeric_date_and_quoted_name() {
    let attribution = parse_attribution("On 2/17/26, 11:37 AM, \"Niko\" <niko@rumilabs.io> wrote:")
        .unwrap();
    assert_eq!(attribution.name, "Niko");
    assert_eq!(attribution.initials, "NI");
}

#[test]
fn test_attribution_single_name() {
    let attribution = parse_attribution("On 2/17/26, Madonna <m@x.com> wrote:").unwrap();
    assert_eq!(attribution.name, "Madonna");
    assert_eq!(attribution.initials, "MA");
}

#[test]
fn test_attribution_falls_back_to_local_part() {
    let attribution =
        parse_attribution("On Tue, Feb 17, 2026 at 11:37 AM <jane.doe@example.com> wrote:")
            .unwrap();
    assert_eq!(attribution.name, "jane doe");
    assert_eq!(attribution.initials, "JD");
}

#[test]
fn test_attribution_local_part_separators() {
    let attribution = parse_attribution("On Mon <first_last-x@host.com> wrote:").unwrap();
    assert_eq!(attribution.name, "first last x");
    assert_eq!(attribution.initials, "FX");
}

#[test]
fn test_attribution_trailing_whitespace_and_colons() {
    let attribution = parse_attribution("On Mon, Jan 5 Ann Smith <ann@x.com> wrote::  ").unwrap();
    assert_eq!(attribution.name, "Ann Smith");
}

#[test]
fn test_attribution_requires_email() {
    assert!(parse_attribution("On Tue, Feb 17, 2026 Niko wrote:").is_none());
}

#[test]
fn test_attribution_requires_wrote() {
    assert!(parse_attribution("Niko Cunningham <niko@rumilabs.io>").is_none());
}

#[test]
fn test_initials() {
    assert_eq!(initials("John Michael Doe"), "JD");
    assert_eq!(initials("ada"), "AD");
    assert_eq!(initials("X"), "X");
}

#[test]
fn test_attribution_display() {
    let attribution = parse_attribution("On Mon Bob Lee <bob@co.com> wrote:").unwrap();
    assert_eq!(attribution.to_string(), "Bob Lee (BL)");
}
