//! Finders that combine the output of several child finders

use std::collections::BTreeSet;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::{
    ColumnFinder, ColumnSelector, FinderError, RowFinder, RowSelector, Table, TrainError,
    Trainable,
};

/// How the index sets of several finders are merged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combination {
    /// Indices selected by any finder
    #[default]
    Union,
    /// Indices selected by every finder
    Intersection,
}

impl Combination {
    /// Merge index sets into one ascending list
    pub fn combine(self, sets: Vec<Vec<usize>>) -> Vec<usize> {
        match self {
            Combination::Union => sets
                .into_iter()
                .flatten()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
            Combination::Intersection => {
                let mut sets = sets.into_iter();
                let Some(first) = sets.next() else {
                    return Vec::new();
                };
                let mut common: BTreeSet<usize> = first.into_iter().collect();
                for set in sets {
                    let set: AHashSet<usize> = set.into_iter().collect();
                    common.retain(|index| set.contains(index));
                }
                common.into_iter().collect()
            }
        }
    }
}

/// Runs every child row finder and merges their rows
#[derive(Debug, Default)]
pub struct MultiRowFinder {
    finders: Vec<RowSelector>,
    combination: Combination,
}

impl MultiRowFinder {
    pub fn new(combination: Combination) -> Self {
        Self {
            finders: Vec::new(),
            combination,
        }
    }

    /// Builder-style [`MultiRowFinder::push`]
    pub fn with(mut self, finder: RowSelector) -> Self {
        self.push(finder);
        self
    }

    pub fn push(&mut self, finder: RowSelector) {
        self.finders.push(finder);
    }

    pub fn finders(&self) -> &[RowSelector] {
        &self.finders
    }

    pub fn combination(&self) -> Combination {
        self.combination
    }
}

impl RowFinder for MultiRowFinder {
    fn find_rows(&self, data: &Table) -> Result<Vec<usize>, FinderError> {
        let sets = self
            .finders
            .iter()
            .map(|finder| finder.find_rows(data))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.combination.combine(sets))
    }
}

impl Trainable for MultiRowFinder {
    fn train(&mut self, data: &Table) -> Result<(), TrainError> {
        for (index, finder) in self.finders.iter_mut().enumerate() {
            finder.train(data).map_err(|source| TrainError::Child {
                index,
                source: Box::new(source),
            })?;
        }
        Ok(())
    }

    fn is_trained(&self) -> bool {
        self.finders.iter().all(Trainable::is_trained)
    }

    fn reset(&mut self) {
        self.finders.iter_mut().for_each(Trainable::reset);
    }
}

/// Runs every child column finder and merges their columns
#[derive(Debug, Default)]
pub struct MultiColumnFinder {
    finders: Vec<ColumnSelector>,
    combination: Combination,
}

impl MultiColumnFinder {
    pub fn new(combination: Combination) -> Self {
        Self {
            finders: Vec::new(),
            combination,
        }
    }

    /// Builder-style [`MultiColumnFinder::push`]
    pub fn with(mut self, finder: ColumnSelector) -> Self {
        self.push(finder);
        self
    }

    pub fn push(&mut self, finder: ColumnSelector) {
        self.finders.push(finder);
    }

    pub fn finders(&self) -> &[ColumnSelector] {
        &self.finders
    }

    pub fn combination(&self) -> Combination {
        self.combination
    }
}

impl ColumnFinder for MultiColumnFinder {
    fn find_columns(&mut self, data: &Table) -> Result<Vec<usize>, FinderError> {
        let sets = self
            .finders
            .iter_mut()
            .map(|finder| finder.find_columns(data))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.combination.combine(sets))
    }
}

impl Trainable for MultiColumnFinder {
    fn train(&mut self, data: &Table) -> Result<(), TrainError> {
        for (index, finder) in self.finders.iter_mut().enumerate() {
            finder.train(data).map_err(|source| TrainError::Child {
                index,
                source: Box::new(source),
            })?;
        }
        Ok(())
    }

    fn is_trained(&self) -> bool {
        self.finders.iter().all(Trainable::is_trained)
    }

    fn reset(&mut self) {
        self.finders.iter_mut().for_each(Trainable::reset);
    }
}
