use crate::HarnessError;
use crate::suite::{MeasuredResult, SuiteKind};

/// Cumulative cross-suite state for one candidate. `score` adds
/// `max(suite throughputs) / own throughput` per suite, so the candidate
/// that is always fastest accumulates exactly 1.0 per suite and lower is
/// better. `places` appends the 1-based rank in suite-execution order.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreEntry {
    pub method: String,
    pub score: f64,
    pub places: Vec<usize>,
}

/// Owned aggregation state, threaded through the pipeline instead of living
/// in module-level globals, so independent runs cannot cross-contaminate.
#[derive(Clone, Debug, Default)]
pub struct RankingAggregator {
    entries: Vec<ScoreEntry>,
    suite_initials: Vec<&'static str>,
}

impl RankingAggregator {
    pub fn new() -> Self {
        RankingAggregator::default()
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn suite_count(&self) -> usize {
        self.suite_initials.len()
    }

    fn upsert(&mut self, method: &str, increment: f64, place: usize) {
        match self.entries.iter_mut().find(|e| e.method == method) {
            Some(entry) => {
                entry.score += increment;
                entry.places.push(place);
            }
            None => self.entries.push(ScoreEntry {
                method: method.to_string(),
                score: increment,
                places: vec![place],
            }),
        }
    }
}

/// Turns one suite's measured results into its ranking table and folds the
/// suite into the aggregator.
///
/// Rows: one `[name, throughput, "ops/sec"]` per candidate in display order,
/// a blank row, one speedup row per adjacent ranked pair, a blank row.
pub fn compile_suite(
    kind: SuiteKind,
    results: &[MeasuredResult],
    aggregator: &mut RankingAggregator,
) -> Result<Vec<Vec<String>>, HarnessError> {
    if results.is_empty() {
        return Err(HarnessError::invalid_input(format!(
            "{} suite produced no results",
            kind.label()
        )));
    }
    for result in results {
        if !(result.throughput > 0.0) || !result.throughput.is_finite() {
            return Err(HarnessError::invalid_input(format!(
                "{} suite: throughput for {} must be positive and finite, got {}",
                kind.label(),
                result.candidate,
                result.throughput
            )));
        }
    }

    let mut table: Vec<Vec<String>> = Vec::new();
    for result in results {
        table.push(vec![
            result.candidate.clone(),
            format!("{:.2}", result.throughput),
            "ops/sec".to_string(),
        ]);
    }
    table.push(Vec::new());

    // Stable sort: display-order ties keep deterministic speedup rows.
    let mut ordered: Vec<&MeasuredResult> = results.iter().collect();
    ordered.sort_by(|a, b| b.throughput.total_cmp(&a.throughput));

    for i in 1..ordered.len() {
        let faster = ordered[i - 1];
        let slower = ordered[i];
        let speedup = faster.throughput / slower.throughput;
        let mut row = vec![
            faster.candidate.clone(),
            format!("{speedup:.2}"),
            "x faster than".to_string(),
            slower.candidate.clone(),
        ];
        // Every pair reads as "fast" except the bottom pair, which reads as
        // "slow": the tag describes the end of the field it sits at.
        let adj = if i == ordered.len() - 1 { "slow" } else { "fast" };
        if speedup > 50.0 {
            row.push(format!("(ultra {adj})"));
        } else if speedup > 25.0 {
            row.push(format!("(super {adj})"));
        } else if speedup > 10.0 {
            row.push(format!("({adj})"));
        }
        table.push(row);
    }
    table.push(Vec::new());

    let max = ordered[0].throughput;
    for (rank, result) in ordered.iter().enumerate() {
        aggregator.upsert(&result.candidate, max / result.throughput, rank + 1);
    }
    aggregator.suite_initials.push(kind.initial());

    Ok(table)
}

/// The terminal output: entries ascending by cumulative score, normalized so
/// the best candidate reads exactly 1.00, with the per-suite places behind a
/// header of suite initials.
pub fn compile_final(aggregator: &RankingAggregator) -> Result<Vec<Vec<String>>, HarnessError> {
    if aggregator.entries.is_empty() {
        return Err(HarnessError::invalid_input("no suite results recorded"));
    }
    let mut ordered: Vec<&ScoreEntry> = aggregator.entries.iter().collect();
    ordered.sort_by(|a, b| a.score.total_cmp(&b.score));
    let min = ordered[0].score;

    let mut table: Vec<Vec<String>> = Vec::new();
    let mut header = vec![String::new(), String::new()];
    header.extend(aggregator.suite_initials.iter().map(|s| s.to_string()));
    table.push(header);

    for entry in ordered {
        let mut row = vec![format!("{:.2}", entry.score / min), entry.method.clone()];
        row.extend(entry.places.iter().map(|p| p.to_string()));
        table.push(row);
    }
    Ok(table)
}
