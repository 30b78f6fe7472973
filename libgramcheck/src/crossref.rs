use crate::grammar::{Grammar, ProductionName};
use itertools::Itertools;

/// Carries documentation links from `copy` over to `authority`, matching
/// productions by name. A production the copy doesn't define (or doesn't
/// link) ends up without a link. Only the link side-table changes.
pub fn enrich_links(mut authority: Grammar, copy: &Grammar) -> Grammar {
    let names: Vec<ProductionName> = authority
        .named_productions()
        .map(|(name, _)| name.clone())
        .unique()
        .collect();

    let total = names.len();
    let mut linked = 0;
    for name in names {
        let link = copy
            .production(name.as_str())
            .and_then(|_| copy.link(&name))
            .cloned();
        match link {
            Some(link) => {
                linked += 1;
                authority.links.insert(name, link);
            }
            None => {
                authority.links.remove(&name);
            }
        }
    }

    log::debug!("linked {} of {} authority productions", linked, total);
    authority
}
