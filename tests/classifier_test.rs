use email_blocks::*;

#[test]
fn test_text_only_is_rich() {
    assert_eq!(choose_strategy("", "Hello"), RenderStrategy::RichBlocks);
}

#[test]
fn test_no_content_is_isolated() {
    assert_eq!(choose_strategy("", ""), RenderStrategy::IsolatedHtml);
    assert_eq!(choose_strategy("  ", "\n"), RenderStrategy::IsolatedHtml);
}

#[test]
fn test_two_tables_are_designed() {
    let html = "<table><tr><td>a</td></tr></table><table><tr><td>b</td></tr></table>";
    assert!(is_designed_html(html));
    assert_eq!(
        choose_strategy(html, "a long enough plain text alternative"),
        RenderStrategy::IsolatedHtml
    );
}

#[test]
fn test_single_plain_table_with_text_is_rich() {
    let html = "<table><tr><td>x</td></tr></table>";
    let text = "abcdefghijklmnopqrstuvwxy";
    assert_eq!(text.len(), 25);
    assert!(!is_designed_html(html));
    assert_eq!(choose_strategy(html, text), RenderStrategy::RichBlocks);
}

#[test]
fn test_designed_markers() {
    let designed = [
        r#"<table width="600"><tr><td>x</td></tr></table>"#,
        r#"<TABLE cellpadding=0><tr><td>x</td></tr></TABLE>"#,
        "<center>Sale</center>",
        r#"<img src="hero.png" width="600">"#,
        r#"<img src="hero.png" height=120>"#,
        r#"<font color="red">Sale</font>"#,
        r#"<div style="padding: 4px; background-color: #fff">x</div>"#,
        r#"<td style='background-image: url(a.png)'>x</td>"#,
    ];
    for html in designed {
        assert!(is_designed_html(html), "{html}");
    }
}

#[test]
fn test_plain_markup_is_not_designed() {
    let plain = [
        r#"<div dir="ltr">Hi there<br></div>"#,
        r#"<img src="icon.png" width="32">"#,
        r#"<font face="Arial">text</font>"#,
        r#"<p style="color: red">text</p>"#,
    ];
    for html in plain {
        assert!(!is_designed_html(html), "{html}");
    }
}

#[test]
fn test_html_with_visible_text_is_rich() {
    assert_eq!(choose_strategy("<p>Hi</p>", ""), RenderStrategy::RichBlocks);
}

#[test]
fn test_html_without_text_is_isolated() {
    assert_eq!(
        choose_strategy(r#"<img src="a.png">"#, ""),
        RenderStrategy::IsolatedHtml
    );
}

#[test]
fn test_visible_text_ignores_markup_only_content() {
    assert!(!has_visible_text("<style>p { color: red }</style>&nbsp;<br><!-- hi -->"));
    assert!(has_visible_text("<div><b>x</b></div>"));
}

#[test]
fn test_substantial_text_boundary() {
    assert!(!is_substantial_text(&"a".repeat(SUBSTANTIAL_TEXT_CHARS)));
    assert!(is_substantial_text(&"a".repeat(SUBSTANTIAL_TEXT_CHARS + 1)));
    assert!(!is_substantial_text("   short   "));
}
