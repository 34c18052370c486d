//! Roster reconciliation.
//!
//! The backend only reports who attended a session. Reconciling that present
//! list against the class roster yields the full present/absent table, and a
//! set of reconciled sessions folds into the multi-session attendance grid.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::types::{AttendanceEntry, AttendanceRecord, AttendanceStatus, RollNo, RosterEntry};

/// Full student list for one session, with counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub students: Vec<AttendanceEntry>,
    pub present_count: usize,
    pub total: usize,
}

/// Merge a present list with the roster.
///
/// Present-list entries are trusted as-is, duplicates included. Roster
/// students missing from it are appended as absent. The result is ordered by
/// roll number; the sort is stable so duplicates keep their relative order.
pub fn reconcile(roster: &[RosterEntry], present: &[AttendanceEntry]) -> Reconciliation {
    let present_rolls: HashSet<&str> = present.iter().map(|s| s.roll_no.as_str()).collect();

    let mut students: Vec<AttendanceEntry> = present.to_vec();
    students.extend(
        roster
            .iter()
            .filter(|r| !present_rolls.contains(r.roll_no.as_str()))
            .map(|r| AttendanceEntry {
                roll_no: r.roll_no.clone(),
                name: r.name.clone(),
                status: AttendanceStatus::Absent,
            }),
    );
    students.sort_by(|a, b| a.roll_no.cmp(&b.roll_no));

    let present_count = students.iter().filter(|s| s.status.is_present()).count();
    let total = students.len();

    Reconciliation {
        students,
        present_count,
        total,
    }
}

/// One past session with its complete student table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledSession {
    pub subject: String,
    pub date: String,
    pub students: Vec<AttendanceEntry>,
    pub present_count: usize,
    pub total: usize,
}

impl ReconciledSession {
    pub fn from_record(record: &AttendanceRecord, roster: &[RosterEntry]) -> Self {
        let Reconciliation {
            students,
            present_count,
            total,
        } = reconcile(roster, &record.students);

        Self {
            subject: record.subject.clone(),
            date: record.date.clone(),
            students,
            present_count,
            total,
        }
    }

    /// Status of a student in this session; unlisted students are absent.
    pub fn status_of(&self, roll_no: &RollNo) -> AttendanceStatus {
        self.students
            .iter()
            .find(|s| &s.roll_no == roll_no)
            .map(|s| s.status)
            .unwrap_or(AttendanceStatus::Absent)
    }
}

/// Reconcile every record of a history against the same roster.
pub fn reconcile_history(
    records: &[AttendanceRecord],
    roster: &[RosterEntry],
) -> Vec<ReconciledSession> {
    records
        .iter()
        .map(|record| ReconciledSession::from_record(record, roster))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionColumn {
    pub subject: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRow {
    pub roll_no: RollNo,
    pub name: String,
    /// One status per grid column, in column order.
    pub statuses: Vec<AttendanceStatus>,
}

impl GridRow {
    pub fn present_count(&self) -> usize {
        self.statuses.iter().filter(|s| s.is_present()).count()
    }
}

/// Students × sessions attendance sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceGrid {
    pub columns: Vec<SessionColumn>,
    pub rows: Vec<GridRow>,
}

impl AttendanceGrid {
    /// Rows are the union of every student seen in any session (first name
    /// seen wins), ordered by roll number.
    pub fn build(sessions: &[ReconciledSession]) -> Self {
        let mut names: HashMap<&RollNo, &str> = HashMap::new();
        for entry in sessions.iter().flat_map(|s| s.students.iter()) {
            names.entry(&entry.roll_no).or_insert(entry.name.as_str());
        }

        let mut rolls: Vec<&RollNo> = names.keys().copied().collect();
        rolls.sort();

        let lookups: Vec<HashMap<&RollNo, AttendanceStatus>> = sessions
            .iter()
            .map(|session| {
                let mut by_roll = HashMap::new();
                for entry in &session.students {
                    by_roll.entry(&entry.roll_no).or_insert(entry.status);
                }
                by_roll
            })
            .collect();

        let rows = rolls
            .into_iter()
            .map(|roll_no| GridRow {
                roll_no: roll_no.clone(),
                name: names[roll_no].to_string(),
                statuses: lookups
                    .iter()
                    .map(|by_roll| {
                        by_roll
                            .get(roll_no)
                            .copied()
                            .unwrap_or(AttendanceStatus::Absent)
                    })
                    .collect(),
            })
            .collect();

        let columns = sessions
            .iter()
            .map(|s| SessionColumn {
                subject: s.subject.clone(),
                date: s.date.clone(),
            })
            .collect();

        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(entries: &[(&str, &str)]) -> Vec<RosterEntry> {
        entries
            .iter()
            .map(|(roll, name)| RosterEntry {
                roll_no: RollNo::from(*roll),
                name: name.to_string(),
            })
            .collect()
    }

    fn present(roll: &str, name: &str) -> AttendanceEntry {
        AttendanceEntry {
            roll_no: RollNo::from(roll),
            name: name.to_string(),
            status: AttendanceStatus::Present,
        }
    }

    fn summary(students: &[AttendanceEntry]) -> Vec<(String, AttendanceStatus)> {
        students
            .iter()
            .map(|s| (s.roll_no.to_string(), s.status))
            .collect()
    }

    #[test]
    fn test_absentees_are_added() {
        let result = reconcile(
            &roster(&[("1", "A"), ("2", "B"), ("3", "C")]),
            &[present("1", "A")],
        );

        assert_eq!(
            result.students,
            vec![
                present("1", "A"),
                AttendanceEntry {
                    roll_no: RollNo::from("2"),
                    name: "B".to_string(),
                    status: AttendanceStatus::Absent,
                },
                AttendanceEntry {
                    roll_no: RollNo::from("3"),
                    name: "C".to_string(),
                    status: AttendanceStatus::Absent,
                },
            ]
        );
        assert_eq!(result.present_count, 1);
        assert_eq!(result.total, 3);
    }

    #[test]
    fn test_numeric_ordering() {
        let result = reconcile(&roster(&[("10", "Ten"), ("2", "Two")]), &[]);
        let rolls: Vec<&str> = result.students.iter().map(|s| s.roll_no.as_str()).collect();
        assert_eq!(rolls, vec!["2", "10"]);
    }

    #[test]
    fn test_empty_present_list_marks_everyone_absent() {
        let result = reconcile(&roster(&[("1", "A"), ("2", "B")]), &[]);
        assert_eq!(result.present_count, 0);
        assert_eq!(result.total, 2);
        assert!(result
            .students
            .iter()
            .all(|s| s.status == AttendanceStatus::Absent));
    }

    #[test]
    fn test_duplicates_and_outsiders_are_kept() {
        let result = reconcile(
            &roster(&[("1", "A"), ("2", "B")]),
            &[present("2", "B"), present("2", "B"), present("9", "Guest")],
        );
        assert_eq!(
            summary(&result.students),
            vec![
                ("1".to_string(), AttendanceStatus::Absent),
                ("2".to_string(), AttendanceStatus::Present),
                ("2".to_string(), AttendanceStatus::Present),
                ("9".to_string(), AttendanceStatus::Present),
            ]
        );
        assert_eq!(result.present_count, 3);
        assert_eq!(result.total, 4);
    }

    #[test]
    fn test_reported_status_is_preserved() {
        let mut marked_absent = present("1", "A");
        marked_absent.status = AttendanceStatus::Absent;
        let result = reconcile(&roster(&[("1", "A")]), &[marked_absent]);
        assert_eq!(result.present_count, 0);
        assert_eq!(result.total, 1);
    }

    #[test]
    fn test_unusable_roll_numbers_still_included() {
        let result = reconcile(&roster(&[("", "Blank"), ("X1", "Odd"), ("3", "C")]), &[]);
        let rolls: Vec<&str> = result.students.iter().map(|s| s.roll_no.as_str()).collect();
        assert_eq!(rolls, vec!["3", "", "X1"]);
    }

    #[test]
    fn test_grid_takes_union_and_defaults_absent() {
        let first = ReconciledSession::from_record(
            &AttendanceRecord {
                subject: "DBMS".to_string(),
                date: "2025-07-01".to_string(),
                students: vec![present("1", "A")],
            },
            &roster(&[("1", "A"), ("2", "B")]),
        );
        let second = ReconciledSession {
            subject: "DBMS".to_string(),
            date: "2025-07-02".to_string(),
            students: vec![present("10", "Late joiner")],
            present_count: 1,
            total: 1,
        };

        let grid = AttendanceGrid::build(&[first, second]);
        assert_eq!(grid.columns.len(), 2);
        assert_eq!(grid.columns[1].date, "2025-07-02");

        let rows: Vec<(&str, &str, Vec<AttendanceStatus>)> = grid
            .rows
            .iter()
            .map(|r| (r.roll_no.as_str(), r.name.as_str(), r.statuses.clone()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("1", "A", vec![AttendanceStatus::Present, AttendanceStatus::Absent]),
                ("2", "B", vec![AttendanceStatus::Absent, AttendanceStatus::Absent]),
                ("10", "Late joiner", vec![AttendanceStatus::Absent, AttendanceStatus::Present]),
            ]
        );
        assert_eq!(grid.rows[0].present_count(), 1);
    }

    #[test]
    fn test_status_of_unlisted_student() {
        let session = ReconciledSession::from_record(
            &AttendanceRecord {
                subject: "OS".to_string(),
                date: "2025-07-03".to_string(),
                students: vec![present("4", "D")],
            },
            &[],
        );
        assert_eq!(session.status_of(&RollNo::from("4")), AttendanceStatus::Present);
        assert_eq!(session.status_of(&RollNo::from("5")), AttendanceStatus::Absent);
    }

    #[test]
    fn test_empty_history_gives_empty_grid() {
        assert!(AttendanceGrid::build(&[]).is_empty());
        assert!(reconcile_history(&[], &roster(&[("1", "A")])).is_empty());
    }
}
