use stylescope_lib::analysis::aggregate;
use stylescope_lib::PageSample;

/// Shape produced by the in-page measurement script for a small landing page.
const LANDING_PAGE: &str = r#"{
  "elements": [
    { "tag": "body", "hasText": true, "display": "block", "visibility": "visible",
      "fontFamily": "Inter, sans-serif", "fontWeight": "400", "fontSize": "16px",
      "lineHeight": "24px", "letterSpacing": "normal", "textTransform": "none",
      "color": "rgb(17, 24, 39)", "backgroundColor": "rgb(255, 255, 255)" },
    { "tag": "nav", "hasText": true, "display": "flex", "visibility": "visible",
      "fontFamily": "Inter, sans-serif", "fontWeight": "400", "fontSize": "16px",
      "lineHeight": "24px", "letterSpacing": "normal", "textTransform": "none",
      "color": "rgb(17, 24, 39)", "backgroundColor": "rgba(0, 0, 0, 0)" },
    { "tag": "a", "hasText": true, "display": "inline", "visibility": "visible",
      "fontFamily": "Inter, sans-serif", "fontWeight": "500", "fontSize": "14px",
      "lineHeight": "20px", "letterSpacing": "normal", "textTransform": "uppercase",
      "color": "rgb(37, 99, 235)", "backgroundColor": "rgba(0, 0, 0, 0)" },
    { "tag": "h1", "hasText": true, "display": "block", "visibility": "visible",
      "fontFamily": "Playfair Display, serif", "fontWeight": "700", "fontSize": "56px",
      "lineHeight": "64px", "letterSpacing": "-0.02em", "textTransform": "none",
      "color": "rgb(17, 24, 39)", "backgroundColor": "rgba(0, 0, 0, 0)" },
    { "tag": "div", "hasText": false, "display": "block", "visibility": "visible",
      "fontFamily": "Inter, sans-serif", "fontWeight": "400", "fontSize": "12px",
      "lineHeight": "16px", "letterSpacing": "normal", "textTransform": "none",
      "color": "rgb(17, 24, 39)", "backgroundColor": "rgb(243, 244, 246)" },
    { "tag": "small", "hasText": true, "display": "inline", "visibility": "visible",
      "fontFamily": "Inter, sans-serif", "fontWeight": "400", "fontSize": "12px",
      "lineHeight": "16px", "letterSpacing": "normal", "textTransform": "none",
      "color": "rgb(107, 114, 128)", "backgroundColor": "rgba(0, 0, 0, 0)" },
    { "tag": "button", "hasText": true, "display": "none", "visibility": "visible",
      "fontFamily": "Inter, sans-serif", "fontWeight": "600", "fontSize": "15px",
      "lineHeight": "20px", "letterSpacing": "normal", "textTransform": "none",
      "color": "rgb(255, 255, 255)", "backgroundColor": "rgb(37, 99, 235)" },
    { "tag": "p", "hasText": true, "display": "block", "visibility": "visible",
      "fontFamily": "Inter, sans-serif", "fontWeight": "400", "fontSize": "18px",
      "lineHeight": "28px", "letterSpacing": "normal", "textTransform": "none",
      "color": "rgb(75, 85, 99)", "backgroundColor": "rgba(0, 0, 0, 0)" }
  ],
  "truncated": false
}"#;

#[test]
fn landing_page_fixture_aggregates() {
    let sample: PageSample = serde_json::from_str(LANDING_PAGE).expect("fixture parses");
    assert_eq!(sample.elements.len(), 8);
    assert!(!sample.truncated);

    let result = aggregate(&sample);

    // body and nav share a signature; small is too small and unlisted; the
    // hidden button never claims its signature.
    let tags: Vec<&str> = result
        .typography
        .iter()
        .map(|style| style.element.as_str())
        .collect();
    assert_eq!(tags, vec!["h1", "p", "a", "body"]);

    let h1 = &result.typography[0];
    assert_eq!(h1.font_family, "Playfair Display, serif");
    assert_eq!(h1.letter_spacing, "-0.02em");
    assert_eq!(result.typography[2].text_transform, "uppercase");

    assert_eq!(
        result.colors,
        vec![
            "rgb(17, 24, 39)",
            "rgb(255, 255, 255)",
            "rgb(37, 99, 235)",
            "rgb(243, 244, 246)",
            "rgb(107, 114, 128)",
            "rgb(75, 85, 99)",
        ]
    );
}

#[test]
fn missing_fields_default_to_empty() {
    let sample: PageSample =
        serde_json::from_str(r#"{ "elements": [ { "tag": "h2", "hasText": true } ] }"#)
            .expect("partial fixture parses");

    let result = aggregate(&sample);
    assert_eq!(result.typography.len(), 1);
    assert_eq!(result.typography[0].font_size, "");
    assert!(result.colors.is_empty());
}
