//! Dotted-path to SQL resolution
//!
//! A [`JoinPlan`] starts at one entity (aliased `t0`) and adds a
//! `LEFT JOIN` per relation hop the first time a path needs it. Hops shared
//! between paths (`device.analyzer.model`, `device.analyzer.manufacturer`)
//! reuse the same alias.

use crate::core::error::{CrmError, Result};
use crate::core::schema::EntityKind;

/// Joins needed to read a set of paths from one root entity
#[derive(Debug, Clone)]
pub struct JoinPlan {
    root: EntityKind,
    /// (relation path prefix, alias, join clause)
    joins: Vec<(String, String, String)>,
}

impl JoinPlan {
    pub fn new(root: EntityKind) -> Self {
        Self {
            root,
            joins: Vec::new(),
        }
    }

    /// Resolve a dotted path to a qualified column, adding joins as needed
    pub fn column(&mut self, path: &str) -> Result<String> {
        let root = self.root;
        let unknown = || CrmError::UnknownField {
            entity: root.name(),
            path: path.to_string(),
        };

        let segments: Vec<&str> = path.split('.').collect();
        let (last, hops) = segments.split_last().ok_or_else(unknown)?;

        let mut kind = self.root;
        let mut alias = "t0".to_string();
        let mut prefix = String::new();

        for hop in hops {
            let relation = kind.relation(hop).ok_or_else(unknown)?;
            if !prefix.is_empty() {
                prefix.push('.');
            }
            prefix.push_str(hop);

            alias = match self.joins.iter().find(|(p, _, _)| *p == prefix) {
                Some((_, existing, _)) => existing.clone(),
                None => {
                    let next = format!("t{}", self.joins.len() + 1);
                    let clause = format!(
                        "LEFT JOIN {} {} ON {}.id = {}.{}",
                        relation.target.table(),
                        next,
                        next,
                        alias,
                        relation.column
                    );
                    self.joins.push((prefix.clone(), next.clone(), clause));
                    next
                }
            };
            kind = relation.target;
        }

        let column = kind.column(last).ok_or_else(unknown)?;
        Ok(format!("{}.{}", alias, column))
    }

    /// `FROM` clause with all joins added so far
    pub fn from_clause(&self) -> String {
        let mut sql = format!("FROM {} t0", self.root.table());
        for (_, _, clause) in &self.joins {
            sql.push(' ');
            sql.push_str(clause);
        }
        sql
    }
}
