//! Generic JSON-backed repository
//!
//! Each collection lives in memory behind an `RwLock<HashMap>` and is
//! written back to its own file with [`write_json_atomic`].

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{BudgetError, BudgetResult};

use super::file_io::{read_json, write_json_atomic};

/// A storable record keyed by a typed ID and placed on one date
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Hash + Ord + fmt::Display;

    fn record_id(&self) -> Self::Id;
    fn record_date(&self) -> NaiveDate;
    /// Whether a user-typed fragment names this record
    fn matches_id(&self, fragment: &str) -> bool;
}

/// A record generated from (and back-referencing) a parent definition
pub trait Child: Record {
    type Parent: Copy + Eq + fmt::Display;

    fn parent(&self) -> Option<Self::Parent>;
}

#[derive(Serialize, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct RecordFile<T> {
    #[serde(default)]
    records: Vec<T>,
}

impl<T> Default for RecordFile<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

pub struct Repository<T: Record> {
    path: PathBuf,
    data: RwLock<HashMap<T::Id, T>>,
}

impl<T: Record> Repository<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> BudgetResult<RwLockReadGuard<'_, HashMap<T::Id, T>>> {
        self.data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> BudgetResult<RwLockWriteGuard<'_, HashMap<T::Id, T>>> {
        self.data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    pub fn load(&self) -> BudgetResult<()> {
        let file: RecordFile<T> = read_json(&self.path)?;
        let mut data = self.write()?;
        data.clear();
        for record in file.records {
            data.insert(record.record_id(), record);
        }
        Ok(())
    }

    pub fn save(&self) -> BudgetResult<()> {
        let data = self.read()?;
        self.persist(&data)
    }

    fn persist(&self, data: &HashMap<T::Id, T>) -> BudgetResult<()> {
        let file = RecordFile {
            records: sorted(data.values().cloned().collect()),
        };
        write_json_atomic(&self.path, &file)
    }

    pub fn get(&self, id: T::Id) -> BudgetResult<Option<T>> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// Resolve a full or abbreviated ID
    ///
    /// An abbreviation that names more than one record is a validation error.
    pub fn find(&self, fragment: &str) -> BudgetResult<Option<T>> {
        let data = self.read()?;
        let mut matches = data.values().filter(|r| r.matches_id(fragment));
        let first = matches.next().cloned();
        if matches.next().is_some() {
            return Err(BudgetError::Validation(format!(
                "'{}' matches more than one record; use a longer ID",
                fragment
            )));
        }
        Ok(first)
    }

    /// All records, ascending by date
    pub fn list(&self) -> BudgetResult<Vec<T>> {
        Ok(sorted(self.read()?.values().cloned().collect()))
    }

    /// Records dated within `[start, end]`, ascending
    pub fn range(&self, start: NaiveDate, end: NaiveDate) -> BudgetResult<Vec<T>> {
        let data = self.read()?;
        Ok(sorted(
            data.values()
                .filter(|r| (start..=end).contains(&r.record_date()))
                .cloned()
                .collect(),
        ))
    }

    pub fn count(&self) -> BudgetResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn upsert(&self, record: T) -> BudgetResult<()> {
        self.write()?.insert(record.record_id(), record);
        Ok(())
    }

    pub fn insert_many(&self, records: Vec<T>) -> BudgetResult<()> {
        let mut data = self.write()?;
        for record in records {
            data.insert(record.record_id(), record);
        }
        Ok(())
    }

    pub fn delete(&self, id: T::Id) -> BudgetResult<Option<T>> {
        Ok(self.write()?.remove(&id))
    }

    /// Copy the in-memory collection ahead of a multi-step change
    pub fn snapshot(&self) -> BudgetResult<Snapshot<T>> {
        Ok(Snapshot(self.read()?.clone()))
    }

    /// Put a snapshot back and rewrite the file to match
    ///
    /// Memory is restored even when the write fails.
    pub fn restore(&self, snapshot: Snapshot<T>) -> BudgetResult<()> {
        let mut data = self.write()?;
        *data = snapshot.0;
        self.persist(&data)
    }
}

/// Saved contents of one repository, see [`Repository::snapshot`]
pub struct Snapshot<T: Record>(HashMap<T::Id, T>);

/// Run `apply`, which may change and save both repositories, as one unit
///
/// If `apply` fails, both repositories are restored to their contents from
/// before the call and the original error is returned.
pub fn with_rollback<A, B, R, F>(
    first: &Repository<A>,
    second: &Repository<B>,
    apply: F,
) -> BudgetResult<R>
where
    A: Record,
    B: Record,
    F: FnOnce() -> BudgetResult<R>,
{
    let first_before = first.snapshot()?;
    let second_before = second.snapshot()?;

    let err = match apply() {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    let restored = [
        (first.path(), first.restore(first_before)),
        (second.path(), second.restore(second_before)),
    ];
    for (path, result) in restored {
        if let Err(restore_err) = result {
            warn!(
                path = %path.display(),
                error = %restore_err,
                "could not rewrite collection while rolling back"
            );
        }
    }
    debug!(error = %err, "rolled back change across collections");
    Err(err)
}

impl<T: Child> Repository<T> {
    /// Instances generated from `parent`, ascending
    pub fn children_of(&self, parent: T::Parent) -> BudgetResult<Vec<T>> {
        let data = self.read()?;
        Ok(sorted(
            data.values()
                .filter(|r| r.parent() == Some(parent))
                .cloned()
                .collect(),
        ))
    }

    /// Remove every instance of `parent`, returning what was removed
    pub fn delete_by_parent(&self, parent: T::Parent) -> BudgetResult<Vec<T>> {
        let mut data = self.write()?;
        let ids: Vec<T::Id> = data
            .values()
            .filter(|r| r.parent() == Some(parent))
            .map(Record::record_id)
            .collect();
        let removed = ids.iter().filter_map(|id| data.remove(id)).collect();
        Ok(sorted(removed))
    }

    /// Replace the instances of `parent` dated on or after `cutoff` with
    /// `replacements`, and persist, as one step
    ///
    /// The write lock is held across the swap and the save. If the save
    /// fails, the in-memory collection is restored and the error returned.
    /// Returns the number of instances removed.
    pub fn replace_from(
        &self,
        parent: T::Parent,
        cutoff: NaiveDate,
        replacements: Vec<T>,
    ) -> BudgetResult<usize> {
        let mut data = self.write()?;
        let snapshot = data.clone();

        let stale: Vec<T::Id> = data
            .values()
            .filter(|r| r.parent() == Some(parent) && r.record_date() >= cutoff)
            .map(Record::record_id)
            .collect();
        for id in &stale {
            data.remove(id);
        }
        let inserted = replacements.len();
        for record in replacements {
            data.insert(record.record_id(), record);
        }

        if let Err(err) = self.persist(&data) {
            warn!(
                %parent,
                path = %self.path.display(),
                error = %err,
                "save failed while replacing instances, rolling back"
            );
            *data = snapshot;
            return Err(err);
        }

        debug!(
            %parent,
            %cutoff,
            removed = stale.len(),
            inserted,
            "replaced future instances"
        );
        Ok(stale.len())
    }
}

fn sorted<T: Record>(mut records: Vec<T>) -> Vec<T> {
    records.sort_by_key(|r| (r.record_date(), r.record_id()));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Frequency, Money, RecurrenceRule, RecurringExpense};
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn repo(temp_dir: &TempDir) -> Repository<Expense> {
        Repository::new(temp_dir.path().join("expenses.json"))
    }

    fn definition() -> RecurringExpense {
        let rule = RecurrenceRule::bounded(Frequency::Monthly, date(2024, 1, 1), date(2024, 6, 1));
        RecurringExpense::new("Rent", Money::from_units(1500), rule)
    }

    #[test]
    fn test_save_and_load_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let expenses = repo(&temp_dir);
        expenses
            .upsert(Expense::new("Later", Money::from_units(2), date(2024, 3, 1)))
            .unwrap();
        expenses
            .upsert(Expense::new("Sooner", Money::from_units(1), date(2024, 1, 1)))
            .unwrap();
        expenses.save().unwrap();

        let reloaded = repo(&temp_dir);
        reloaded.load().unwrap();
        let names: Vec<_> = reloaded.list().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Sooner", "Later"]);
    }

    #[test]
    fn test_range_is_inclusive() {
        let temp_dir = TempDir::new().unwrap();
        let expenses = repo(&temp_dir);
        for day in [1, 10, 20] {
            expenses
                .upsert(Expense::new("x", Money::from_units(1), date(2024, 1, day)))
                .unwrap();
        }
        assert_eq!(expenses.range(date(2024, 1, 1), date(2024, 1, 10)).unwrap().len(), 2);
        assert_eq!(expenses.range(date(2024, 1, 11), date(2024, 1, 19)).unwrap().len(), 0);
    }

    #[test]
    fn test_find_by_short_id() {
        let temp_dir = TempDir::new().unwrap();
        let expenses = repo(&temp_dir);
        let expense = Expense::new("Coffee", Money::from_cents(450), date(2024, 1, 2));
        let id = expense.id;
        expenses.upsert(expense).unwrap();

        let found = expenses.find(&id.to_string()).unwrap().unwrap();
        assert_eq!(found.id, id);
        assert!(expenses.find("exp-zzzz").unwrap().is_none());
    }

    #[test]
    fn test_delete_by_parent_leaves_others() {
        let temp_dir = TempDir::new().unwrap();
        let expenses = repo(&temp_dir);
        let rent = definition();
        expenses
            .insert_many(vec![
                Expense::occurrence_of(&rent, date(2024, 1, 1)),
                Expense::occurrence_of(&rent, date(2024, 2, 1)),
                Expense::new("One-off", Money::from_units(5), date(2024, 1, 15)),
            ])
            .unwrap();

        let removed = expenses.delete_by_parent(rent.id).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(expenses.count().unwrap(), 1);
    }

    #[test]
    fn test_replace_from_keeps_history() {
        let temp_dir = TempDir::new().unwrap();
        let expenses = repo(&temp_dir);
        let rent = definition();
        let months = [1, 2, 3, 4];
        expenses
            .insert_many(
                months
                    .iter()
                    .map(|m| Expense::occurrence_of(&rent, date(2024, *m, 1)))
                    .collect(),
            )
            .unwrap();

        let replacement = vec![
            Expense::occurrence_of(&rent, date(2024, 3, 5)),
            Expense::occurrence_of(&rent, date(2024, 4, 5)),
        ];
        let removed = expenses
            .replace_from(rent.id, date(2024, 3, 1), replacement)
            .unwrap();
        assert_eq!(removed, 2);

        let dates: Vec<_> = expenses
            .children_of(rent.id)
            .unwrap()
            .into_iter()
            .map(|e| e.due_date)
            .collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 1), date(2024, 2, 1), date(2024, 3, 5), date(2024, 4, 5)]
        );

        let reloaded = repo(&temp_dir);
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 4);
    }

    #[test]
    fn test_with_rollback_restores_both_collections() {
        let temp_dir = TempDir::new().unwrap();
        let definitions: Repository<RecurringExpense> =
            Repository::new(temp_dir.path().join("recurring_expenses.json"));
        let instances_path = temp_dir.path().join("expenses.json");
        std::fs::create_dir_all(instances_path.join("occupied")).unwrap();
        let instances: Repository<Expense> = Repository::new(instances_path);

        let rent = definition();
        let result = with_rollback(&definitions, &instances, || {
            definitions.upsert(rent.clone())?;
            definitions.save()?;
            instances.insert_many(vec![Expense::occurrence_of(&rent, date(2024, 1, 1))])?;
            instances.save()
        });
        assert!(result.is_err());

        assert_eq!(definitions.count().unwrap(), 0);
        assert_eq!(instances.count().unwrap(), 0);

        let reloaded: Repository<RecurringExpense> =
            Repository::new(temp_dir.path().join("recurring_expenses.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 0);
    }

    #[test]
    fn test_with_rollback_passes_success_through() {
        let temp_dir = TempDir::new().unwrap();
        let definitions: Repository<RecurringExpense> =
            Repository::new(temp_dir.path().join("recurring_expenses.json"));
        let instances = repo(&temp_dir);

        let count = with_rollback(&definitions, &instances, || {
            definitions.upsert(definition())?;
            definitions.save()?;
            definitions.count()
        })
        .unwrap();
        assert_eq!(count, 1);
        assert_eq!(definitions.count().unwrap(), 1);
    }

    #[test]
    fn test_replace_from_rolls_back_on_save_failure() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes the final rename fail
        let path = temp_dir.path().join("expenses.json");
        std::fs::create_dir_all(path.join("occupied")).unwrap();
        let expenses: Repository<Expense> = Repository::new(path);

        let rent = definition();
        let original = Expense::occurrence_of(&rent, date(2024, 5, 1));
        let original_id = original.id;
        expenses.upsert(original).unwrap();

        let result = expenses.replace_from(
            rent.id,
            date(2024, 1, 1),
            vec![Expense::occurrence_of(&rent, date(2024, 5, 2))],
        );
        assert!(result.is_err());

        let remaining = expenses.list().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, original_id);
    }
}
