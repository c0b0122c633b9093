//! Per-transducer frequency partitioning.

use sdi_core::{Error, Result, TraceBatch};
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Traces recorded by one transducer at a single frequency.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrequencyGroup {
    pub transducer: u8,
    pub khz: f32,
    /// Rows of the file batch for this transducer, in file order. The
    /// intensity matrix keeps the file-wide width.
    pub traces: TraceBatch,
}

/// Row indices per transducer, each paired with its single frequency.
///
/// # Errors
/// Returns [`Error::InconsistentFrequency`] if a transducer reports more than one frequency.
pub fn transducer_groups(batch: &TraceBatch) -> Result<Vec<(u8, f32, Vec<usize>)>> {
    let mut rows: BTreeMap<u8, Vec<usize>> = BTreeMap::new();
    for (i, &transducer) in batch.transducer.iter().enumerate() {
        rows.entry(transducer).or_default().push(i);
    }

    rows.into_iter()
        .map(|(transducer, indices)| {
            let mut frequencies: Vec<f32> = Vec::new();
            for &i in &indices {
                let khz = batch.khz[i];
                if !frequencies.iter().any(|f| f.to_bits() == khz.to_bits()) {
                    frequencies.push(khz);
                }
            }
            match frequencies.as_slice() {
                [khz] => Ok((transducer, *khz, indices)),
                _ => Err(Error::InconsistentFrequency {
                    transducer,
                    frequencies,
                }),
            }
        })
        .collect()
}

/// Splits a batch into one group per transducer, sorted ascending by frequency.
///
/// # Errors
/// Returns [`Error::InconsistentFrequency`] if a transducer reports more than one frequency,
/// or [`Error::ColumnLength`] if the batch columns disagree in length.
pub fn partition_by_frequency(batch: &TraceBatch) -> Result<Vec<FrequencyGroup>> {
    let mut groups = transducer_groups(batch)?
        .into_iter()
        .map(|(transducer, khz, indices)| {
            Ok(FrequencyGroup {
                transducer,
                khz,
                traces: batch.select(&indices)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    groups.sort_by(|a, b| a.khz.total_cmp(&b.khz));
    log::debug!("partitioned {} traces into {} frequencies", batch.len(), groups.len());
    Ok(groups)
}
