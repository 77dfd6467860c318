//! Ranking reachable channels by latency

use std::collections::BTreeMap;

use crate::validation::result::ProbeResult;

/// How reachable channels are selected from a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMode {
    /// The N fastest channels overall
    Top(usize),
    /// Every reachable channel, fastest first
    All,
    /// One group per channel name, groups in lexical order, each fastest
    /// first and optionally capped
    Grouped { per_group: Option<usize> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelGroup {
    pub name: String,
    pub entries: Vec<ProbeResult>,
}

/// The terminal artifact of a run: reachable channels only, fastest first.
#[derive(Debug, Clone, PartialEq)]
pub enum RankedList {
    Flat(Vec<ProbeResult>),
    Grouped(Vec<ChannelGroup>),
}

impl Default for RankedList {
    fn default() -> Self {
        RankedList::Flat(Vec::new())
    }
}

impl RankedList {
    /// Number of channels across all groups
    pub fn len(&self) -> usize {
        match self {
            RankedList::Flat(entries) => entries.len(),
            RankedList::Grouped(groups) => groups.iter().map(|g| g.entries.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All channels in output order
    pub fn iter(&self) -> Box<dyn Iterator<Item = &ProbeResult> + '_> {
        match self {
            RankedList::Flat(entries) => Box::new(entries.iter()),
            RankedList::Grouped(groups) => Box::new(groups.iter().flat_map(|g| g.entries.iter())),
        }
    }
}

/// Rank probe results.
///
/// Failed probes are dropped. The rest are sorted by latency with ties kept
/// in input order, so the outcome never depends on completion order.
pub fn rank(results: Vec<ProbeResult>, mode: RankMode) -> RankedList {
    let mut reachable: Vec<ProbeResult> = results.into_iter().filter(|r| r.is_ok()).collect();
    reachable.sort_by_key(|r| (r.latency, r.candidate.index));

    match mode {
        RankMode::Top(n) => {
            reachable.truncate(n);
            RankedList::Flat(reachable)
        }
        RankMode::All => RankedList::Flat(reachable),
        RankMode::Grouped { per_group } => {
            let mut by_name: BTreeMap<String, Vec<ProbeResult>> = BTreeMap::new();
            for result in reachable {
                by_name
                    .entry(result.candidate.name.clone())
                    .or_default()
                    .push(result);
            }

            let groups = by_name
                .into_iter()
                .map(|(name, mut entries)| {
                    if let Some(limit) = per_group {
                        entries.truncate(limit);
                    }
                    ChannelGroup { name, entries }
                })
                .collect();
            RankedList::Grouped(groups)
        }
    }
}
