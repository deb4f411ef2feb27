//! Route names by prefix.

use tracing::debug;

use crate::domain::RoutePrefix;
use crate::source::{SourceError, TripSession};

/// Distinct route names starting with `prefix`, sorted ascending.
///
/// Matching is case-insensitive. Whatever order or duplicates the session
/// returns, the result is sorted by byte order with no repeats, and only
/// names that really start with the prefix are kept.
pub async fn lookup(
    session: &mut dyn TripSession,
    prefix: &RoutePrefix,
) -> Result<Vec<String>, SourceError> {
    let mut names = session.route_names(prefix).await?;

    names.retain(|name| prefix.matches(name));
    names.sort();
    names.dedup();

    debug!(%prefix, count = names.len(), "route lookup");
    Ok(names)
}
