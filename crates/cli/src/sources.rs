// ABOUTME: Catalog of crawlable sources exposed by the CLI.
// ABOUTME: Maps source names to descriptions for lookup and listing.

use newswire_listing::HACKERNEWS_SOURCE;

/// A crawlable source the binary knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Every source the `run` subcommand accepts.
pub const SOURCES: &[SourceInfo] = &[SourceInfo {
    name: HACKERNEWS_SOURCE,
    description: "Hacker News front-page stories (news.ycombinator.com)",
}];

/// Look up a source by name.
pub fn find(name: &str) -> Option<&'static SourceInfo> {
    SOURCES.iter().find(|source| source.name == name)
}
