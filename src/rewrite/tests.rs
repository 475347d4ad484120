use std::borrow::Cow;

use regex::Regex;

use super::{
    GOOGLE_FONTS_MARKER, Injection, JQUERY_PINNED, Position, Rule, RuleSet, STORE_REMOVED_COMMENT,
};
use crate::config::MenuMode;

/// A trimmed-down exported page carrying every vendor construct.
const VENDOR_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<title>Swift Doodles</title>
<link href="//cdn2.editmysite.com/fonts/Raleway/font.css?2" rel="stylesheet" type="text/css" />
<link href="//cdn2.editmysite.com/fonts/Lora/font.css?2" rel="stylesheet" type="text/css" />
<link id="wsite-base-style" rel="stylesheet" type="text/css" href="//cdn2.editmysite.com/css/sites.css?buildTime=1234" />
<link rel="stylesheet" type="text/css" href="//cdn2.editmysite.com/css/old/fancybox.css?1234" />
<link rel="stylesheet" type="text/css" href="//cdn2.editmysite.com/css/social-icons.css?buildtime=1234" media="screen,projection" />
<link rel="stylesheet" type="text/css" href="//cdn2.editmysite.com/css/old/slideshow/slideshow.css?1234" />
<link rel="stylesheet" type="text/css" href="files/main_style.css?1700000000" title="wsite-theme-css" />
<script src='https://cdn2.editmysite.com/js/jquery-1.8.3.min.js'></script>
<script type="text/javascript" src="//cdn2.editmysite.com/js/lang/en/stl.js?buildTime=1234&"></script>
<script> var STATIC_BASE = '//cdn1.editmysite.com/'; var ASSETS_BASE = '//cdn2.editmysite.com/';
var STYLE_PREFIX = 'wsite';
</script>
<script type="text/javascript">_W = _W || {}; _W.securePrefix='api.weebly.com';</script>
<script>_W.relinquish && _W.relinquish()</script>
<script type="text/javascript">_W.configDomain = "www.weebly.com";</script>
<script>_W.themePlugins = [];</script>
<script type="text/javascript">
function initFlyouts(){initPublishedFlyoutMenus([{"id":"1","title":"Home","url":"index.html"},{"id":"129236209278723622","title":"Store","url":"store.html","target":""}],"1","<li class=\"wsite-menu-item-wrap\"><a href=\"\" class=\"wsite-menu-item\"></a></li>",'active',false,{})}
if (window.addEventListener) { window.addEventListener('load', initFlyouts, false); }
</script>
</head>
<body>
<ul class="wsite-menu-default">
<li id="active"><a href="/">Home</a></li>
<!-- store -->
<li id="pg129236209278723622"><a href="/store.html" data-membership-required="0">Store</a></li>
<!-- /store -->
</ul>
<div id="customer-accounts-app"></div>
<script src="https://cdn2.editmysite.com/js/site/main.js?buildTime=1234"></script>
<script type="text/javascript" src="//cdn2.editmysite.com/js/old/slideshow-jq.js?buildTime=1234"></script>
<script type="text/javascript" src="//cdn2.editmysite.com/js/site/main-customer-accounts-site.js?buildTime=1234"></script>
<script type="text/javascript">_W.recaptchaUrl = "https://www.google.com/recaptcha/api.js";</script>
<script language="javascript" src="files/theme/plugins.js"></script>
<script language="javascript" src="files/theme/custom.js"></script>
<script language="javascript" src="files/theme/mobile.js"></script>
</body>
</html>
"#;

fn standard() -> RuleSet {
    RuleSet::standard(MenuMode::Companion, "files")
}

fn clean(text: &str) -> String {
    standard().apply(text).text
}

// ============================================================================
// Whole catalogue
// ============================================================================

#[test]
fn test_vendor_page_is_fully_cleaned() {
    let out = clean(VENDOR_PAGE);

    assert!(!out.contains("editmysite"));
    assert!(!out.contains("_W."));
    assert!(!out.contains("STATIC_BASE"));
    assert!(!out.contains("customer-accounts-app"));
    assert!(!out.contains("pg129236209278723622"));
    assert!(!out.contains(r#""title":"Store""#));

    assert_eq!(out.matches(GOOGLE_FONTS_MARKER).count(), 1);
    assert!(out.contains(JQUERY_PINNED));
    assert!(out.contains(STORE_REMOVED_COMMENT));
    assert!(out.contains(r#"<li id="active"><a href="/">Home</a></li>"#));
    assert!(out.contains(r#"{"id":"1","title":"Home","url":"index.html"}]"#));
    assert!(out.contains(r#"href="files/main_style.css?1700000000""#));
    assert!(out.contains(
        r#"<!-- <script language="javascript" src="files/theme/mobile.js"></script> -->"#
    ));
    assert!(out.contains("function initPublishedFlyoutMenus"));
    assert!(out.contains(r#"<link rel="stylesheet" href="files/mobile-menu.css">"#));
    assert!(out.contains(r#"<script src="files/mobile-menu.js"></script>"#));
}

#[test]
fn test_idempotent_for_every_menu_mode() {
    for mode in [MenuMode::Companion, MenuMode::Inline, MenuMode::Off] {
        let rules = RuleSet::standard(mode, "files");
        let once = rules.apply(VENDOR_PAGE);
        assert!(!once.is_unchanged());

        let twice = rules.apply(&once.text);
        assert_eq!(twice.text, once.text, "mode {mode:?}");
        assert!(twice.fired.is_empty(), "mode {mode:?} fired {:?}", twice.fired);
    }
}

#[test]
fn test_end_to_end_scenario() {
    let input = r#"<head>
<link href="//cdn2.editmysite.com/fonts/Dosis/font.css?2" rel="stylesheet">
<link id="wsite-base-style" rel="stylesheet" href="//cdn2.editmysite.com/css/sites.css" />
</head>
<body>
<script src="http://cdn2.editmysite.com/js/jquery-1.8.3.min.js"></script>
<ul><li id="pg129236209278723622">Store</li></ul>
</body>"#;

    let out = clean(input);
    assert!(out.contains("https://fonts.googleapis.com/css2?family=Raleway"));
    assert!(out.contains(JQUERY_PINNED));
    assert!(out.contains("<ul><!-- Store menu item removed --></ul>"));

    assert!(!out.contains("editmysite.com/fonts"));
    assert!(!out.contains("editmysite.com/js/jquery"));
    assert!(!out.contains(r#"<li id="pg129236209278723622">"#));
}

#[test]
fn test_plain_document_is_untouched() {
    let input = "<html><head></head><body><p>Hello</p></body></html>";
    let rules = RuleSet::standard(MenuMode::Off, "files");
    let rewrite = rules.apply(input);
    assert_eq!(rewrite.text, input);
    assert!(rewrite.is_unchanged());
}

// ============================================================================
// Deletions
// ============================================================================

#[test]
fn test_all_vendor_font_links_removed() {
    let links: String = (0..5)
        .map(|i| format!("<link   href=\"//cdn2.editmysite.com/fonts/F{i}/font.css\" rel=\"stylesheet\" />\n\t"))
        .collect();
    let input = format!("<head>{links}<title>x</title></head>");

    let out = RuleSet::standard(MenuMode::Off, "files").apply(&input).text;
    assert_eq!(out.matches("editmysite.com/fonts").count(), 0);
    assert_eq!(out, "<head><title>x</title></head>");
}

#[test]
fn test_inline_block_stops_at_first_script_close() {
    let input = "<script>var STATIC_BASE = '/'; if (a < b) { x = {y: 1}; }</script>\n<script>keep()</script>";
    assert_eq!(clean(input), "<script>keep()</script>");
}

#[test]
fn test_multiline_customer_accounts_block() {
    let input = "<script type=\"text/javascript\">\n  function initCustomerAccountsModels() {\n    (function(){ return 1; })();\n  }\n</script>\n<p>after</p>";
    assert_eq!(clean(input), "<p>after</p>");
}

#[test]
fn test_store_entry_removed_from_nav_json() {
    let input = r#"[{"id":"1","title":"Home","url":"index.html"},{"id":"129236209278723622","title":"Store","url":"store.html","target":"","nav_menu":false}]"#;
    assert_eq!(clean(input), r#"[{"id":"1","title":"Home","url":"index.html"}]"#);
}

#[test]
fn test_store_entry_first_in_nav_json() {
    let input = r#"[{"id":"129236209278723622","title":"Store","url":"store.html","target":""},{"id":"1","title":"Home","url":"index.html"}]"#;
    assert_eq!(clean(input), r#"[{"id":"1","title":"Home","url":"index.html"}]"#);
}

#[test]
fn test_slideshow_assets_removed() {
    let input = concat!(
        "<link rel=\"stylesheet\" type=\"text/css\" href=\"//cdn2.editmysite.com/css/old/slideshow/slideshow.css?1\" />\n",
        "<script type=\"text/javascript\" src=\"//cdn2.editmysite.com/js/old/slideshow-jq.js?buildTime=1\"></script>\n",
        "<p>x</p>",
    );
    let fired = standard().apply(input).fired;
    assert!(fired.contains(&"vendor-slideshow-css"));
    assert!(fired.contains(&"vendor-slideshow-js"));
    assert_eq!(clean(input), "<p>x</p>");
}

#[test]
fn test_template_artifacts_loader_removed() {
    let input = "<script src='files/templateArtifacts.js?1700000000'></script>\n<p>x</p>";
    assert_eq!(clean(input), "<p>x</p>");
}

// ============================================================================
// Substitution and comment-out
// ============================================================================

#[test]
fn test_jquery_any_quote_and_protocol() {
    for tag in [
        "<script src='https://cdn2.editmysite.com/js/jquery-1.8.3.min.js'></script>",
        "<script src=\"http://cdn2.editmysite.com/js/jquery-1.8.3.min.js\"></script>",
    ] {
        assert_eq!(clean(tag), JQUERY_PINNED);
    }
}

#[test]
fn test_comment_out_skips_already_commented() {
    let input = concat!(
        "<!-- <script language=\"javascript\" src=\"files/theme/custom.js\"></script> -->\n",
        "<script language=\"javascript\" src=\"files/theme/plugins.js\"></script>\n",
    );
    let out = clean(input);
    assert!(!out.contains("<!-- <!--"));
    assert_eq!(
        out.matches("<!-- <script language=\"javascript\"").count(),
        2
    );
}

#[test]
fn test_comment_out_rule_borrows_when_all_commented() {
    let rule = Rule::comment_out("custom", "<script src=\"a.js\"></script>");
    let input = "<!--<script src=\"a.js\"></script> -->";
    assert!(matches!(rule.apply(input), Cow::Borrowed(_)));

    let out = rule.apply("<script src=\"a.js\"></script>");
    assert_eq!(out, "<!-- <script src=\"a.js\"></script> -->");
}

// ============================================================================
// Structural removal
// ============================================================================

#[test]
fn test_store_item_commented_form() {
    let input = "<ul>\n<!-- a -->\n<li id=\"pg129236209278723622\" class=\"wsite-menu-item-wrap\">\n<a href=\"/store.html\">Store</a>\n</li>\n<!-- b -->\n</ul>";
    assert_eq!(
        clean(input),
        "<ul>\n<!-- Store menu item removed -->\n</ul>"
    );
}

#[test]
fn test_store_item_bare_form() {
    let input = "<ul><li id=\"pg129236209278723622\"><a>Store</a></li><li>Next</li></ul>";
    assert_eq!(
        clean(input),
        "<ul><!-- Store menu item removed --><li>Next</li></ul>"
    );
}

#[test]
fn test_store_item_fence_keeps_following_sibling() {
    let input = "<!-- a -->\n<li id=\"pg129236209278723622\"><a>Store</a></li>\n<li id=\"pg2\"><a>Next</a></li>\n<!-- b -->";
    assert_eq!(
        clean(input),
        "<!-- a -->\n<!-- Store menu item removed -->\n<li id=\"pg2\"><a>Next</a></li>\n<!-- b -->"
    );
}

#[test]
fn test_store_item_with_submenu_stops_at_first_close() {
    // No element balancing: the item ends at the first `</li>`.
    let input = "<ul><li id=\"pg129236209278723622\"><a>Store</a><div><ul><li><a>Cat</a></li></ul></div></li><li>Next</li></ul>";
    assert_eq!(
        clean(input),
        "<ul><!-- Store menu item removed --></ul></div></li><li>Next</li></ul>"
    );
}

#[test]
fn test_structural_unknown_form_is_noop() {
    let input = "<li data-id=\"pg129236209278723622\">Store</li>";
    assert_eq!(clean(input), input);
}

#[test]
fn test_structural_first_alternative_wins() {
    let rule = Rule::structural(
        "pick",
        vec![Regex::new("b+").unwrap(), Regex::new("a").unwrap()],
        "X",
    );
    assert_eq!(rule.apply("abba"), "aXa");
    assert_eq!(rule.apply("aa"), "XX");
}

// ============================================================================
// Conditional injections
// ============================================================================

#[test]
fn test_google_fonts_needs_anchor() {
    let input = "<head><link href=\"//cdn2.editmysite.com/fonts/a.css\" rel=\"stylesheet\">\n</head>";
    let out = clean(input);
    assert!(!out.contains(GOOGLE_FONTS_MARKER));
    // Other rules still apply.
    assert!(!out.contains("editmysite"));
}

#[test]
fn test_google_fonts_skipped_when_present() {
    let input = "<link href=\"https://fonts.googleapis.com/css?family=Lato\" rel=\"stylesheet\">\n<link id=\"wsite-base-style\" href=\"files/x.css\">";
    assert_eq!(clean(input).matches(GOOGLE_FONTS_MARKER).count(), 1);
}

#[test]
fn test_companion_refs_independent_anchors() {
    // No </head>: stylesheet reference skipped, script reference still added.
    let input = "<body><p>x</p></body>";
    let out = clean(input);
    assert!(!out.contains("mobile-menu.css"));
    assert_eq!(
        out,
        "<body><p>x</p><script src=\"files/mobile-menu.js\"></script>\n</body>"
    );
}

#[test]
fn test_companion_dir_is_configurable() {
    let rules = RuleSet::standard(MenuMode::Companion, "assets/menu/");
    let out = rules.apply("<head></head><body></body>").text;
    assert!(out.contains("href=\"assets/menu/mobile-menu.css\""));
    assert!(out.contains("src=\"assets/menu/mobile-menu.js\""));
}

#[test]
fn test_inline_menu_requires_flyouts() {
    let rules = RuleSet::standard(MenuMode::Inline, "files");

    let without = "<body></body>";
    assert_eq!(rules.apply(without).text, without);

    let with = "<script>function initFlyouts(){}</script><body></body>";
    let out = rules.apply(with).text;
    assert!(out.contains("// Mobile menu toggle functionality"));
    assert!(out.ends_with("</script>\n\n</body>"));
    assert!(!out.contains("mobile-menu.js"));
}

#[test]
fn test_menu_stub_after_flyouts_opening() {
    let rules = RuleSet::standard(MenuMode::Off, "files");
    let input = "function initFlyouts(){initPublishedFlyoutMenus([],\"1\")}\nwindow.onload = function(){ initFlyouts() };";
    let out = rules.apply(input).text;
    assert!(out.starts_with(
        "function initFlyouts(){\n\t// Minimal menu functionality stub"
    ));
    assert_eq!(out.matches("function initPublishedFlyoutMenus").count(), 1);
}

#[test]
fn test_menu_stub_without_definition_is_skipped() {
    let rules = RuleSet::standard(MenuMode::Off, "files");
    let input = "window.onload = function(){ initFlyouts() };";
    assert_eq!(rules.apply(input).text, input);
}

#[test]
fn test_injection_first_anchor_only() {
    let rule = Rule::inject(
        "mark",
        Injection {
            content: "[x]".into(),
            marker: "[x]".into(),
            anchor: "<hr>",
            position: Position::After,
            requires: None,
        },
    );
    assert_eq!(rule.apply("<hr><hr>"), "<hr>[x]<hr>");
    assert!(matches!(rule.apply("<hr>[x]"), Cow::Borrowed(_)));
    assert!(matches!(rule.apply("<br>"), Cow::Borrowed(_)));
}

#[test]
fn test_fired_names_in_order() {
    let rules = RuleSet::standard(MenuMode::Off, "files");
    let input = "<script src=\"https://cdn2.editmysite.com/js/jquery.js\"></script><li id=\"pg129236209278723622\">Store</li>";
    assert_eq!(rules.apply(input).fired, vec!["jquery-pinned", "store-menu-item"]);
}
