use email_blocks::*;
use serde_json::json;

const REPLY: &str = "Hi,\n\nCan you review this?\n\n\
                     On Mon, Jan 5, 2026 at 9:00 AM Bob Lee <bob@co.com> wrote:\n\
                     > Sure, attached.\n\
                     > - Bob";

// --- render_body ---

#[test]
fn test_threaded_reply_drops_quoted_message() {
    let body = render_body("", REPLY, &RenderOptions::threaded());

    assert_eq!(
        body,
        RenderedBody::RichBlocks {
            blocks: vec![
                EmailBlock::paragraph("Hi,"),
                EmailBlock::paragraph("Can you review this?"),
            ],
        }
    );
}

#[test]
fn test_full_reply_keeps_quoted_message() {
    let body = render_body("", REPLY, &RenderOptions::default());
    let blocks = body.blocks().unwrap();

    assert_eq!(blocks.len(), 3);
    match &blocks[2] {
        EmailBlock::QuotedMessage {
            name,
            initials,
            blocks,
        } => {
            assert_eq!(name, "Bob Lee");
            assert_eq!(initials, "BL");
            assert_eq!(
                blocks,
                &vec![
                    EmailBlock::paragraph("Sure, attached."),
                    EmailBlock::UnorderedList {
                        items: vec!["Bob".into()]
                    },
                ]
            );
        }
        other => panic!("expected quoted message, got {other:?}"),
    }
}

#[test]
fn test_no_content() {
    let body = render_body("", "", &RenderOptions::default());
    assert_eq!(body, RenderedBody::IsolatedHtml { html: String::new() });
    assert!(body.is_empty());
}

#[test]
fn test_designed_html_is_isolated_verbatim() {
    let html = r#"<center><table width="600"><tr><td>Big sale</td></tr></table></center>"#;
    let body = render_body(html, "Big sale, see the web version", &RenderOptions::default());

    assert_eq!(body.strategy(), RenderStrategy::IsolatedHtml);
    assert_eq!(
        body,
        RenderedBody::IsolatedHtml {
            html: html.to_string()
        }
    );
}

#[test]
fn test_isolated_html_is_stripped_when_threaded() {
    let html = r#"<div><table width="600"><tr><td>New</td></tr></table></div><div class="gmail_quote">Old newsletter</div>"#;
    let body = render_body(html, "", &RenderOptions::threaded());

    let RenderedBody::IsolatedHtml { html } = body else {
        panic!("expected isolated html");
    };
    assert!(html.contains("New"));
    assert!(!html.contains("Old newsletter"));
}

#[test]
fn test_html_only_body_is_parsed_from_extracted_text() {
    let html = "<div>Hello <b>team</b>,</div><div>Ship it.</div>";
    let body = render_body(html, "", &RenderOptions::default());

    assert_eq!(
        body.blocks().unwrap(),
        &[
            EmailBlock::paragraph("Hello team,"),
            EmailBlock::paragraph("Ship it.")
        ]
    );
}

#[test]
fn test_short_text_prefers_html() {
    let body = render_body(
        "<p>Quick <i>note</i></p>",
        "Quick note",
        &RenderOptions::default(),
    );
    assert_eq!(body.blocks().unwrap(), &[EmailBlock::paragraph("Quick note")]);
}

#[test]
fn test_substantial_text_preferred_over_html() {
    let text = "This plain text alternative is long enough.";
    let body = render_body("<p>Different html</p>", text, &RenderOptions::default());
    assert_eq!(body.blocks().unwrap(), &[EmailBlock::paragraph(text)]);
}

#[test]
fn test_threaded_html_reply() {
    let html = r#"<div dir="ltr">Looks good to me.</div><br><div class="gmail_quote"><div class="gmail_attr">On Mon, Jan 5, 2026 at 9:00 AM Bob Lee &lt;bob@co.com&gt; wrote:</div><blockquote class="gmail_quote">Please review.</blockquote></div>"#;
    let body = render_body(html, "", &RenderOptions::threaded());

    assert_eq!(
        body.blocks().unwrap(),
        &[EmailBlock::paragraph("Looks good to me.")]
    );
}

#[test]
fn test_quote_depth_option() {
    let options = RenderOptions::default().with_max_quote_depth(0);
    let body = render_body("", "> quoted", &options);

    assert_eq!(
        body.blocks().unwrap(),
        &[EmailBlock::Preformatted {
            text: "> quoted".into()
        }]
    );
}

// --- Inline attachments ---

#[test]
fn test_cid_images_resolved() {
    let html = r#"<table width="600"><tr><td><img src="cid:logo@co" alt="logo"><img src=cid:missing></td></tr></table>"#;
    let options = RenderOptions::default()
        .with_attachments(vec![InlineAttachment::new("<logo@co>", "https://cdn.co/logo.png")]);

    let RenderedBody::IsolatedHtml { html } = render_body(html, "", &options) else {
        panic!("expected isolated html");
    };
    assert!(html.contains(r#"<img src="https://cdn.co/logo.png" alt="logo">"#));
    assert!(html.contains("src=cid:missing"));
}

#[test]
fn test_cid_resolution_without_attachments() {
    let html = r#"<img src="cid:a">"#;
    assert_eq!(resolve_inline_images(html, &[]), html);
}

// --- render_message ---

#[test]
fn test_render_multipart_message() {
    let raw = b"From: a@b.com\r\n\
                To: c@d.com\r\n\
                Subject: Hi\r\n\
                MIME-Version: 1.0\r\n\
                Content-Type: multipart/alternative; boundary=\"XYZ\"\r\n\
                \r\n\
                --XYZ\r\n\
                Content-Type: text/plain; charset=utf-8\r\n\
                \r\n\
                Hello there, this is the plain part.\r\n\
                --XYZ\r\n\
                Content-Type: text/html; charset=utf-8\r\n\
                \r\n\
                <p>Hello there, this is the html part.</p>\r\n\
                --XYZ--\r\n";

    let body = render_message(raw, &RenderOptions::default()).unwrap();
    assert_eq!(
        body.blocks().unwrap(),
        &[EmailBlock::paragraph("Hello there, this is the plain part.")]
    );
}

#[test]
fn test_render_html_only_message() {
    let raw = b"From: a@b.com\r\n\
                Subject: Hi\r\n\
                Content-Type: text/html\r\n\
                \r\n\
                <p>Hello</p><p>World</p>";

    let body = render_message(raw, &RenderOptions::default()).unwrap();
    assert_eq!(
        body.blocks().unwrap(),
        &[EmailBlock::paragraph("Hello"), EmailBlock::paragraph("World")]
    );
}

// --- Presentation ---

#[test]
fn test_sandbox_document_declares_scheme() {
    let doc = sandbox_document("<p>x</p>", ColorScheme::Dark);
    assert!(doc.contains(r#"<meta name="color-scheme" content="dark">"#));
    assert!(doc.contains("<body><p>x</p></body>"));
}

// --- Options ---

#[test]
fn test_options_from_json() {
    let options = RenderOptions::from_json(r#"{"trim_quotes": true, "color_scheme": "dark"}"#)
        .unwrap();

    assert!(options.trim_quotes);
    assert_eq!(options.color_scheme, ColorScheme::Dark);
    assert_eq!(options.max_quote_depth, DEFAULT_MAX_QUOTE_DEPTH);
    assert!(options.attachments.is_empty());
}

#[test]
fn test_options_from_invalid_json() {
    let err = RenderOptions::from_json("not json").unwrap_err();
    assert!(matches!(err, RenderError::Config(_)));
}

// --- Serialization ---

#[test]
fn test_block_serialization() {
    assert_eq!(
        serde_json::to_value(EmailBlock::Divider).unwrap(),
        json!({"type": "divider"})
    );
    assert_eq!(
        serde_json::to_value(EmailBlock::QuotedMessage {
            name: "Bob Lee".into(),
            initials: "BL".into(),
            blocks: vec![EmailBlock::paragraph("hi")],
        })
        .unwrap(),
        json!({
            "type": "quoted_message",
            "name": "Bob Lee",
            "initials": "BL",
            "blocks": [{"type": "paragraph", "text": "hi"}]
        })
    );
}

#[test]
fn test_rendered_body_serialization() {
    let body = RenderedBody::IsolatedHtml {
        html: "<p>x</p>".into(),
    };
    let value = serde_json::to_value(&body).unwrap();
    assert_eq!(value, json!({"strategy": "isolated_html", "html": "<p>x</p>"}));

    let back: RenderedBody = serde_json::from_value(value).unwrap();
    assert_eq!(back, body);
}
