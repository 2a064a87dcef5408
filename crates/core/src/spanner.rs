//! Column spanners: labels stretched over several column headers, stacked
//! in levels (level 0 sits directly above the column labels).

use crate::error::TableError;
use serde::Serialize;

/// A placed spanner. `columns` holds sorted table column indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Spanner {
    pub id: String,
    pub label: String,
    pub columns: Vec<usize>,
    pub level: usize,
}

impl Spanner {
    pub fn overlaps(&self, columns: &[usize]) -> bool {
        columns.iter().any(|c| self.columns.binary_search(c).is_ok())
    }
}

/// What the caller asks for; the column selection is resolved by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannerRequest {
    pub id: Option<String>,
    pub label: String,
    pub level: Option<usize>,
    pub replace: bool,
}

impl SpannerRequest {
    pub fn new(label: impl Into<String>) -> Self {
        Self { id: None, label: label.into(), level: None, replace: false }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn level(mut self, level: usize) -> Self {
        self.level = Some(level);
        self
    }

    /// Lets this spanner take over columns from overlapping spanners on the
    /// same level.
    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }
}

/// All spanners of a table, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpannerSet {
    spanners: Vec<Spanner>,
}

impl SpannerSet {
    pub fn iter(&self) -> impl Iterator<Item = &Spanner> {
        self.spanners.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.spanners.is_empty()
    }

    pub fn len(&self) -> usize {
        self.spanners.len()
    }

    pub fn get(&self, id: &str) -> Option<&Spanner> {
        self.spanners.iter().find(|s| s.id == id)
    }

    /// Number of stacked spanner rows.
    pub fn depth(&self) -> usize {
        self.spanners.iter().map(|s| s.level + 1).max().unwrap_or(0)
    }

    pub fn at_level(&self, level: usize) -> impl Iterator<Item = &Spanner> {
        self.spanners.iter().filter(move |s| s.level == level)
    }

    /// Returns a new set with the spanner placed.
    ///
    /// Without an explicit level the spanner goes one level above the highest
    /// spanner it overlaps, or on level 0. On an explicit level an overlap is
    /// an error unless `replace` is set, in which case earlier spanners on
    /// that level give up the shared columns and are dropped once empty.
    pub fn with_spanner(&self, request: &SpannerRequest, columns: Vec<usize>) -> Result<Self, TableError> {
        if columns.is_empty() {
            return Err(TableError::Configuration(format!(
                "Spanner '{}' does not cover any column",
                request.label
            )));
        }
        let id = request.id.clone().unwrap_or_else(|| request.label.clone());
        if self.get(&id).is_some() {
            return Err(TableError::Configuration(format!("Spanner id '{}' is already in use", id)));
        }

        let level = match request.level {
            Some(level) => level,
            None => self
                .spanners
                .iter()
                .filter(|s| s.overlaps(&columns))
                .map(|s| s.level + 1)
                .max()
                .unwrap_or(0),
        };

        let mut spanners = self.spanners.clone();
        let clashing: Vec<&str> = spanners
            .iter()
            .filter(|s| s.level == level && s.overlaps(&columns))
            .map(|s| s.id.as_str())
            .collect();
        if !clashing.is_empty() {
            if !request.replace {
                return Err(TableError::Configuration(format!(
                    "Spanner '{}' overlaps spanner(s) {} on level {}",
                    id,
                    clashing.join(", "),
                    level
                )));
            }
            log::debug!("Spanner '{}' replaces columns of {:?} on level {}", id, clashing, level);
            for spanner in spanners.iter_mut().filter(|s| s.level == level) {
                spanner.columns.retain(|c| columns.binary_search(c).is_err());
            }
            spanners.retain(|s| !s.columns.is_empty());
        }

        spanners.push(Spanner { id, label: request.label.clone(), columns, level });
        Ok(Self { spanners })
    }

    /// Column runs covered by `spanner` in display order. A spanner over
    /// non-adjacent visible columns is drawn as several pieces.
    pub fn runs(spanner: &Spanner, display_order: &[usize]) -> Vec<(usize, usize)> {
        let mut runs: Vec<(usize, usize)> = Vec::new();
        for (pos, col) in display_order.iter().enumerate() {
            if spanner.columns.binary_search(col).is_err() {
                continue;
            }
            match runs.last_mut() {
                Some((start, len)) if *start + *len == pos => *len += 1,
                _ => runs.push((pos, 1)),
            }
        }
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_level_stacks_over_overlaps() {
        let set = SpannerSet::default()
            .with_spanner(&SpannerRequest::new("Price"), vec![1, 2])
            .unwrap()
            .with_spanner(&SpannerRequest::new("Volume"), vec![3])
            .unwrap()
            .with_spanner(&SpannerRequest::new("Market"), vec![1, 2, 3])
            .unwrap();
        assert_eq!(set.get("Price").unwrap().level, 0);
        assert_eq!(set.get("Volume").unwrap().level, 0);
        assert_eq!(set.get("Market").unwrap().level, 1);
        assert_eq!(set.depth(), 2);
    }

    #[test]
    fn test_explicit_level_overlap_requires_replace() {
        let set = SpannerSet::default()
            .with_spanner(&SpannerRequest::new("A").level(0), vec![0, 1, 2])
            .unwrap();
        let err = set.with_spanner(&SpannerRequest::new("B").level(0), vec![2, 3]);
        assert!(matches!(err, Err(TableError::Configuration(_))));

        let replaced = set
            .with_spanner(&SpannerRequest::new("B").level(0).replace(true), vec![2, 3])
            .unwrap();
        assert_eq!(replaced.get("A").unwrap().columns, vec![0, 1]);
        assert_eq!(replaced.get("B").unwrap().columns, vec![2, 3]);
    }

    #[test]
    fn test_replace_drops_emptied_spanners() {
        let set = SpannerSet::default()
            .with_spanner(&SpannerRequest::new("A").level(0), vec![1])
            .unwrap()
            .with_spanner(&SpannerRequest::new("B").level(0).replace(true), vec![0, 1])
            .unwrap();
        assert!(set.get("A").is_none());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_duplicate_id_and_empty_columns() {
        let set = SpannerSet::default()
            .with_spanner(&SpannerRequest::new("A"), vec![0])
            .unwrap();
        assert!(set.with_spanner(&SpannerRequest::new("A").level(3), vec![1]).is_err());
        assert!(set.with_spanner(&SpannerRequest::new("C"), vec![]).is_err());
    }

    #[test]
    fn test_runs_split_on_gaps() {
        let spanner = Spanner { id: "s".into(), label: "s".into(), columns: vec![1, 2, 4], level: 0 };
        assert_eq!(SpannerSet::runs(&spanner, &[0, 1, 2, 3, 4]), vec![(1, 2), (4, 1)]);
        assert_eq!(SpannerSet::runs(&spanner, &[0, 2, 4]), vec![(1, 2)]);
    }
}
