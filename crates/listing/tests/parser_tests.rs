// ABOUTME: Integration tests for the Hacker News listing parser.
// ABOUTME: Covers title/link/score/comment extraction, link resolution, and malformed-row handling.

use newswire_listing::parse_listing;

const BASE: &str = "https://news.ycombinator.com";

/// A listing page in the shape Hacker News actually serves: athing rows,
/// subtext rows, spacer rows, plus a few degenerate rows that must be
/// skipped without taking the page down.
const LISTING_PAGE: &str = r#"<html>
<head><title>Hacker News</title></head>
<body>
<table id="hnmain"><tr><td>
<table class="itemlist">
  <tr class='athing' id='41001'>
    <td class="title"><span class="rank">1.</span></td>
    <td class="votelinks"><center><a id='up_41001' href='vote?id=41001&how=up'><div class='votearrow' title='upvote'></div></a></center></td>
    <td class="title"><span class="titleline"><a href="https://example.com/rust-release">Rust 1.80 released</a><span class="sitebit comhead"> (<a href="from?site=example.com"><span class="sitestr">example.com</span></a>)</span></span></td>
  </tr>
  <tr>
    <td colspan="2"></td>
    <td class="subtext"><span class="subline">
      <span class="score" id="score_41001">256 points</span> by <a href="user?id=alice" class="hnuser">alice</a>
      <span class="age" title="2024-06-15T12:00:00"><a href="item?id=41001">3&nbsp;hours ago</a></span>
      | <a href="hide?id=41001">hide</a>
      | <a href="item?id=41001">142&nbsp;comments</a>
    </span></td>
  </tr>
  <tr class="spacer" style="height:5px"></tr>
  <tr class='athing' id='41002'>
    <td class="title"><span class="rank">2.</span></td>
    <td class="votelinks"></td>
    <td class="title"><span class="titleline"><a href="item?id=41002">Ask HN: How do you test crawlers?</a></span></td>
  </tr>
  <tr>
    <td colspan="2"></td>
    <td class="subtext">
      <span class="score" id="score_41002">5 points</span> by <a href="user?id=bob" class="hnuser">bob</a>
      <span class="age"><a href="item?id=41002">10 minutes ago</a></span>
      | <a href="item?id=41002">discuss</a>
    </td>
  </tr>
  <tr class="spacer" style="height:5px"></tr>
  <tr class='athing' id='41003'>
    <td class="title"><span class="rank">3.</span></td>
    <td class="title"><span class="titleline"><a href="/launches/41003">Acme (YC S24) is hiring</a></span></td>
  </tr>
  <tr>
    <td colspan="2"></td>
    <td class="subtext"><span class="age"><a href="item?id=41003">1 hour ago</a></span></td>
  </tr>
  <tr class='athing'>
    <td class="title"><span class="titleline"><a href="https://example.com/ghost">Row without an id</a></span></td>
  </tr>
  <tr class='athing' id='41005'>
    <td class="title">No titleline span in this row</td>
  </tr>
</table>
</td></tr></table>
</body>
</html>"#;

#[test]
fn test_parses_well_formed_rows() {
    let articles = parse_listing(LISTING_PAGE, BASE, "hackernews");
    assert_eq!(articles.len(), 3, "two malformed rows should be skipped");

    let first = &articles[0];
    assert_eq!(first.title, "Rust 1.80 released");
    assert_eq!(first.url, "https://example.com/rust-release");
    assert_eq!(first.source_name, "hackernews");
    assert_eq!(first.score, 256);
    assert_eq!(first.comments_count, 142);
    assert!(first.content.is_none());
    assert!(first.tags.is_empty());
}

#[test]
fn test_resolves_discussion_links() {
    let articles = parse_listing(LISTING_PAGE, BASE, "hackernews");
    let ask = &articles[1];
    assert_eq!(ask.title, "Ask HN: How do you test crawlers?");
    assert_eq!(ask.url, "https://news.ycombinator.com/item?id=41002");
}

#[test]
fn test_discuss_link_counts_zero_comments() {
    let articles = parse_listing(LISTING_PAGE, BASE, "hackernews");
    assert_eq!(articles[1].score, 5);
    assert_eq!(articles[1].comments_count, 0);
}

#[test]
fn test_rows_without_score_default_to_zero() {
    let articles = parse_listing(LISTING_PAGE, BASE, "hackernews");
    let job = &articles[2];
    assert_eq!(job.title, "Acme (YC S24) is hiring");
    assert_eq!(job.url, "https://news.ycombinator.com/launches/41003");
    assert_eq!(job.score, 0);
    assert_eq!(job.comments_count, 0);
}

#[test]
fn test_empty_and_alien_pages_yield_nothing() {
    assert!(parse_listing("", BASE, "hackernews").is_empty());
    assert!(parse_listing("<html><body><p>maintenance</p></body></html>", BASE, "hackernews")
        .is_empty());
}
