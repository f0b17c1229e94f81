//! Ledger entry models
//!
//! An [`Entry`] is an active income or expense record. When soft-deleted it is
//! wrapped in a [`TrashedEntry`] that remembers when it was deleted, so it can
//! be restored verbatim or expire after the retention period.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::EntryId;
use super::money::Money;

/// Number of days a trashed entry is kept before it expires
pub const RETENTION_DAYS: i64 = 30;

/// Elapsed time after which a trashed entry is purged (30 x 24h)
pub fn retention_period() -> Duration {
    Duration::days(RETENTION_DAYS)
}

/// Largest amount a single entry may carry (one trillion units)
///
/// Keeps totals over millions of entries well inside `i64` hundredths.
pub const MAX_ENTRY_AMOUNT: Money = Money::from_major(1_000_000_000_000);

/// Whether an entry records money coming in or going out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    /// Both kinds, in display order
    pub const ALL: [EntryKind; 2] = [EntryKind::Income, EntryKind::Expense];

    /// Lowercase name used in commands and exports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" | "収入" => Ok(Self::Income),
            "expense" | "out" | "支出" => Ok(Self::Expense),
            other => Err(format!(
                "unknown entry kind '{}' (expected 'income' or 'expense')",
                other
            )),
        }
    }
}

/// An active ledger record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier
    pub id: EntryId,

    /// Income or expense
    pub kind: EntryKind,

    /// Free-text category label, stored trimmed
    pub category: String,

    /// Strictly positive amount
    pub amount: Money,

    /// When the entry was created
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Create a validated entry with a fresh id
    ///
    /// The category is trimmed before it is stored.
    pub fn new(
        kind: EntryKind,
        category: impl AsRef<str>,
        amount: Money,
        created_at: DateTime<Utc>,
    ) -> Result<Self, EntryValidationError> {
        let category = category.as_ref().trim();
        if category.is_empty() {
            return Err(EntryValidationError::EmptyCategory);
        }
        if !amount.is_positive() {
            return Err(EntryValidationError::NonPositiveAmount(amount));
        }
        if amount > MAX_ENTRY_AMOUNT {
            return Err(EntryValidationError::AmountTooLarge(amount));
        }

        Ok(Self {
            id: EntryId::new(),
            kind,
            category: category.to_string(),
            amount,
            created_at,
        })
    }

    /// Check if this entry is income
    pub fn is_income(&self) -> bool {
        self.kind == EntryKind::Income
    }

    /// Check if this entry is an expense
    pub fn is_expense(&self) -> bool {
        self.kind == EntryKind::Expense
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.created_at.format("%Y-%m-%d"),
            self.kind,
            self.category,
            self.amount
        )
    }
}

/// A soft-deleted entry awaiting restore, purge, or expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrashedEntry {
    /// The entry exactly as it was when deleted
    #[serde(flatten)]
    pub entry: Entry,

    /// When the entry was moved to the trash
    pub deleted_at: DateTime<Utc>,
}

impl TrashedEntry {
    /// Wrap an entry deleted at the given instant
    pub fn new(entry: Entry, deleted_at: DateTime<Utc>) -> Self {
        Self { entry, deleted_at }
    }

    /// Id of the wrapped entry
    pub fn id(&self) -> EntryId {
        self.entry.id
    }

    /// Instant at which the retention window closes
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.deleted_at + retention_period()
    }

    /// Whether the retention window has fully elapsed at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.deleted_at >= retention_period()
    }

    /// Whole days remaining before expiry, rounded up and never negative
    pub fn days_left(&self, now: DateTime<Utc>) -> i64 {
        let remaining_ms = (self.expires_at() - now).num_milliseconds();
        if remaining_ms <= 0 {
            return 0;
        }
        let day_ms = Duration::days(1).num_milliseconds();
        (remaining_ms + day_ms - 1) / day_ms
    }

    /// Strip the deletion timestamp, returning the original entry
    pub fn into_entry(self) -> Entry {
        self.entry
    }
}

/// Validation errors for new entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyCategory,
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "Category must not be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Amount must not exceed {} (got {})",
                MAX_ENTRY_AMOUNT, amount
            ),
        }
    }
}

impl std::error::Error for EntryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_new_entry_trims_category() {
        let entry = Entry::new(
            EntryKind::Expense,
            "  食費 ",
            Money::from_major(500),
            test_time(),
        )
        .unwrap();
        assert_eq!(entry.category, "食費");
        assert!(entry.is_expense());
        assert!(!entry.is_income());
        assert_eq!(entry.created_at, test_time());
    }

    #[test]
    fn test_new_entry_validation() {
        assert_eq!(
            Entry::new(EntryKind::Income, "   ", Money::from_major(1), test_time()),
            Err(EntryValidationError::EmptyCategory)
        );
        assert_eq!(
            Entry::new(EntryKind::Income, "Salary", Money::zero(), test_time()),
            Err(EntryValidationError::NonPositiveAmount(Money::zero()))
        );
        assert!(Entry::new(EntryKind::Income, "Salary", Money::from_major(-5), test_time()).is_err());
    }

    #[test]
    fn test_new_entry_amount_ceiling() {
        assert!(Entry::new(EntryKind::Income, "Bonus", MAX_ENTRY_AMOUNT, test_time()).is_ok());

        let huge = Money::parse("92233720368547758.07").unwrap();
        assert_eq!(
            Entry::new(EntryKind::Expense, "Big", huge, test_time()),
            Err(EntryValidationError::AmountTooLarge(huge))
        );
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("income".parse::<EntryKind>().unwrap(), EntryKind::Income);
        assert_eq!("EXPENSE".parse::<EntryKind>().unwrap(), EntryKind::Expense);
        assert_eq!("支出".parse::<EntryKind>().unwrap(), EntryKind::Expense);
        assert!("transfer".parse::<EntryKind>().is_err());
    }

    #[test]
    fn test_trashed_expiry_boundary() {
        let now = test_time();
        let entry = Entry::new(EntryKind::Expense, "Rent", Money::from_major(800), now).unwrap();

        let just_expired = TrashedEntry::new(
            entry.clone(),
            now - retention_period() - Duration::milliseconds(1),
        );
        assert!(just_expired.is_expired(now));

        let exactly = TrashedEntry::new(entry.clone(), now - retention_period());
        assert!(exactly.is_expired(now));

        let recent = TrashedEntry::new(entry, now - Duration::days(29));
        assert!(!recent.is_expired(now));
    }

    #[test]
    fn test_days_left() {
        let now = test_time();
        let entry = Entry::new(EntryKind::Expense, "Rent", Money::from_major(800), now).unwrap();

        assert_eq!(TrashedEntry::new(entry.clone(), now).days_left(now), 30);
        assert_eq!(
            TrashedEntry::new(entry.clone(), now - Duration::hours(1)).days_left(now),
            30
        );
        assert_eq!(
            TrashedEntry::new(entry.clone(), now - Duration::days(29) - Duration::hours(23))
                .days_left(now),
            1
        );
        assert_eq!(
            TrashedEntry::new(entry, now - Duration::days(40)).days_left(now),
            0
        );
    }

    #[test]
    fn test_trashed_serialization_flattens_entry() {
        let now = test_time();
        let entry = Entry::new(EntryKind::Income, "給料", Money::from_major(300_000), now).unwrap();
        let trashed = TrashedEntry::new(entry.clone(), now);

        let value = serde_json::to_value(&trashed).unwrap();
        assert_eq!(value["category"], "給料");
        assert_eq!(value["kind"], "income");
        assert!(value.get("deleted_at").is_some());

        let back: TrashedEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back.into_entry(), entry);
    }
}
