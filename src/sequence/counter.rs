//! Persisted receipt number counter

use regex::Regex;
use std::sync::LazyLock;

use crate::traits::*;
use crate::types::*;
use crate::utils::validation::validate_forced_number;

/// Store key holding the last issued receipt number
pub const LAST_RECEIPT_NUMBER_KEY: &str = "lastReceiptNumber";

// Unanchored: hand-edited values like "nvNVA012x" still resume.
// ASCII digits only; other Unicode digits count as malformed.
static STORED_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"NV([A-Z])([0-9]+)").expect("valid stored number pattern"));

/// Series letter and numeric part of a stored value, if it resembles a number
fn stored_parts(value: &str) -> Option<(char, u64)> {
    let captures = STORED_NUMBER_PATTERN.captures(value)?;
    let series = captures[1].chars().next()?;
    // An overlong digit run is still "past 999"
    let numeric = captures[2].parse::<u64>().unwrap_or(u64::MAX);
    Some((series, numeric))
}

/// Counter that derives receipt numbers from the last issued one
///
/// The counter keeps nothing in memory; every call reads the store, so two
/// counters over the same store observe each other's writes.
pub struct SequenceCounter<S: KeyValueStore> {
    pub(crate) storage: S,
}

impl<S: KeyValueStore> SequenceCounter<S> {
    /// Create a new counter over the given store
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Current receipt number, shown before a receipt is created
    ///
    /// Lazily initializes the store to `NVA001` when nothing has been issued.
    /// A stored value is read the same lenient way `advance` reads it, so
    /// `"NVC0041"` shows as `NVC041` and nothing is written. A serial outside
    /// `1..=999` is normalized to the number `advance` would issue and
    /// persisted. Only a value with no recognisable number restarts at
    /// `NVA001`.
    pub async fn peek_current(&mut self) -> ReceiptResult<ReceiptNumber> {
        let stored = match self.storage.get(LAST_RECEIPT_NUMBER_KEY).await? {
            Some(stored) => stored,
            None => {
                tracing::debug!("No receipt number stored yet, starting at {}", ReceiptNumber::FIRST);
                return self.write(ReceiptNumber::FIRST).await;
            }
        };

        match stored_parts(&stored) {
            Some((series, numeric)) if (1..=u64::from(MAX_SERIAL)).contains(&numeric) => {
                // numeric <= 999 here
                ReceiptNumber::new(series, numeric as u16)
            }
            Some((series, numeric)) => {
                let number = ReceiptNumber::following(series, numeric)?;
                tracing::warn!(
                    "Stored receipt number '{}' is out of range, continuing at {}",
                    stored,
                    number
                );
                self.write(number).await
            }
            None => {
                tracing::warn!(
                    "Stored receipt number '{}' is malformed, restarting at {}",
                    stored,
                    ReceiptNumber::FIRST
                );
                self.write(ReceiptNumber::FIRST).await
            }
        }
    }

    /// Issue the next receipt number and persist it
    ///
    /// Missing or unrecognisable state restarts the sequence at `NVA001`.
    /// Fails only when the store fails or series `Z` is exhausted; in the
    /// latter case nothing is written.
    pub async fn advance(&mut self) -> ReceiptResult<ReceiptNumber> {
        let stored = self.storage.get(LAST_RECEIPT_NUMBER_KEY).await?;

        let next = match stored.as_deref() {
            None => ReceiptNumber::FIRST,
            Some(value) => match stored_parts(value) {
                Some((series, numeric)) => ReceiptNumber::following(series, numeric)?,
                None => {
                    tracing::warn!(
                        "Stored receipt number '{}' is malformed, restarting at {}",
                        value,
                        ReceiptNumber::FIRST
                    );
                    ReceiptNumber::FIRST
                }
            },
        };

        let issued = self.write(next).await?;
        tracing::info!("Receipt number advanced to {}", issued);
        Ok(issued)
    }

    /// Force the counter to `value`, then advance past it
    ///
    /// `force_set("NVB500")` makes `NVB501` current. An ill-formed value is
    /// rejected with `InvalidFormat` and the store is left untouched.
    pub async fn force_set(&mut self, value: &str) -> ReceiptResult<ReceiptNumber> {
        validate_forced_number(value)?;

        // Refuse before writing when the forced value has no successor
        let series = value.chars().nth(RECEIPT_PREFIX.len()).unwrap_or('A');
        let numeric = value[RECEIPT_PREFIX.len() + 1..]
            .parse::<u64>()
            .map_err(|e| ReceiptError::InvalidFormat(e.to_string()))?;
        ReceiptNumber::following(series, numeric)?;

        self.storage.set(LAST_RECEIPT_NUMBER_KEY, value).await?;
        tracing::info!("Receipt number forced to {}", value);
        self.advance().await
    }

    /// Erase the counter and start again, yielding `NVA001`
    pub async fn reset(&mut self) -> ReceiptResult<ReceiptNumber> {
        self.storage.remove(LAST_RECEIPT_NUMBER_KEY).await?;
        tracing::info!("Receipt numbering erased");
        self.advance().await
    }

    /// Make `NVA001` current without advancing
    pub async fn reset_to_start(&mut self) -> ReceiptResult<ReceiptNumber> {
        let number = self.write(ReceiptNumber::FIRST).await?;
        tracing::info!("Receipt number reset to {}", number);
        Ok(number)
    }

    async fn write(&mut self, number: ReceiptNumber) -> ReceiptResult<ReceiptNumber> {
        self.storage
            .set(LAST_RECEIPT_NUMBER_KEY, &number.to_string())
            .await?;
        Ok(number)
    }
}
