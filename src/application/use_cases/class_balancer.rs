// ============================================================
// CLASS BALANCER USE CASE
// ============================================================
// Per-group seeded draws without replacement, then one seeded shuffle

use std::path::Path;

use tracing::{debug, info};

use crate::domain::dataset::{rank_counts, BalanceReport, GroupCount, GroupIndex, RecordTable};
use crate::domain::error::{AppError, Result};
use crate::domain::prep_config::{BalancerConfig, RoundingRule, SamplingPolicy};
use crate::infrastructure::csv::{CsvParser, CsvWriter};
use crate::infrastructure::sampling::SeededSampler;

/// Balanced table together with its run summary
#[derive(Debug, Clone)]
pub struct BalancedTable {
    pub table: RecordTable,
    pub report: BalanceReport,
}

pub struct ClassBalancer {
    group_column: String,
    policy: SamplingPolicy,
    seed: u64,
}

impl ClassBalancer {
    pub fn new(group_column: impl Into<String>, policy: SamplingPolicy, seed: u64) -> Self {
        Self {
            group_column: group_column.into(),
            policy,
            seed,
        }
    }

    pub fn from_config(config: &BalancerConfig) -> Self {
        Self::new(config.group_column.clone(), config.policy, config.seed)
    }

    pub fn balance(&self, table: &RecordTable) -> Result<BalancedTable> {
        let column = table.require_column(&self.group_column)?;
        let index = GroupIndex::build(table, column);
        let targets = self.targets(&index, table.len())?;

        let mut selected = Vec::with_capacity(targets.iter().sum());
        let mut drawn = Vec::with_capacity(index.len());
        for (group, &target) in index.groups().iter().zip(&targets) {
            let picks = SeededSampler::new(self.seed).sample_indices(group.rows.len(), target);
            debug!(
                group = %group.key,
                available = group.rows.len(),
                drawn = picks.len(),
                "Sampled group"
            );
            drawn.push(GroupCount {
                group: group.key.clone(),
                count: picks.len(),
            });
            selected.extend(picks.into_iter().map(|i| group.rows[i]));
        }
        SeededSampler::new(self.seed).shuffle(&mut selected);

        let sampled = table.select_rows(&selected);

        let report = BalanceReport {
            group_column: self.group_column.clone(),
            original_total: table.len(),
            original_counts: index.distribution(),
            sampled_total: sampled.len(),
            sampled_counts: rank_counts(drawn),
        };
        info!(
            groups = index.len(),
            original = report.original_total,
            sampled = report.sampled_total,
            "Balanced table"
        );

        Ok(BalancedTable {
            table: sampled,
            report,
        })
    }

    /// Read `input`, balance, write `output`. Nothing is written on error.
    pub fn balance_file(&self, input: &Path, output: &Path) -> Result<BalancedTable> {
        let table = CsvParser::new().parse_file(input)?;
        info!(
            path = %input.display(),
            rows = table.len(),
            "Loaded table for balancing"
        );

        let balanced = self.balance(&table)?;
        CsvWriter::new().write_file(&balanced.table, output)?;
        info!(path = %output.display(), "Sampled dataset saved");
        Ok(balanced)
    }

    /// Rows to draw from each group, aligned with `index.groups()`
    fn targets(&self, index: &GroupIndex, total_rows: usize) -> Result<Vec<usize>> {
        match self.policy {
            SamplingPolicy::EqualFloor => {
                let floor = index.min_size().unwrap_or(0);
                Ok(vec![floor; index.len()])
            }
            SamplingPolicy::Proportional {
                total_samples,
                rounding,
            } => {
                if total_samples == 0 {
                    return Err(AppError::InvalidConfig(
                        "total_samples must be > 0".to_string(),
                    ));
                }
                if total_rows == 0 {
                    return Err(AppError::InvalidConfig(format!(
                        "cannot draw {} samples from an empty table",
                        total_samples
                    )));
                }

                let targets = allocate_proportional(&index.sizes(), total_samples, rounding);
                for (group, &target) in index.groups().iter().zip(&targets) {
                    if target > group.rows.len() {
                        return Err(AppError::InsufficientGroupSize {
                            group: group.key.clone(),
                            requested: target,
                            available: group.rows.len(),
                        });
                    }
                }
                Ok(targets)
            }
        }
    }
}

/// Split `total_samples` across groups in proportion to `sizes`.
pub fn allocate_proportional(
    sizes: &[usize],
    total_samples: usize,
    rounding: RoundingRule,
) -> Vec<usize> {
    let total_rows: usize = sizes.iter().sum();
    if total_rows == 0 {
        return vec![0; sizes.len()];
    }

    match rounding {
        RoundingRule::Nearest => sizes
            .iter()
            .map(|&size| {
                let quota = total_samples as f64 * (size as f64 / total_rows as f64);
                quota.round_ties_even() as usize
            })
            .collect(),
        RoundingRule::LargestRemainder => {
            let total = total_rows as u128;
            let mut targets = Vec::with_capacity(sizes.len());
            let mut remainders = Vec::with_capacity(sizes.len());
            for (slot, &size) in sizes.iter().enumerate() {
                let quota = size as u128 * total_samples as u128;
                targets.push((quota / total) as usize);
                remainders.push((quota % total, slot));
            }

            let leftover = total_samples - targets.iter().sum::<usize>();
            // stable: equal remainders go to the earlier group
            remainders.sort_by(|a, b| b.0.cmp(&a.0));
            for &(_, slot) in remainders.iter().take(leftover) {
                targets[slot] += 1;
            }
            targets
        }
    }
}
