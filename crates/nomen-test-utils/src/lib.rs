//! Test fixtures for nomen development.
//!
//! Provides the standard class and feature indices used across the
//! workspace tests, a lightweight [`Classification`] that only implements
//! [`Translatable`], and a [`Detections`] container that implements
//! [`Mappable`] over two independent identifiers.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use nomen_core::{NamedIndex, TranslateError};
use nomen_translate::{Grid, IndexTranslator, Mappable, MappingTable, Translatable};
use smallvec::SmallVec;

/// Identifier of the label-class schema.
pub const CLASSES: &str = "classes";

/// Identifier of the feature-descriptor schema.
pub const FEATURES: &str = "features";

/// Build an index from literal names. Panics on invalid input.
pub fn index(names: &[&str]) -> NamedIndex {
    match NamedIndex::from_names(names.iter().copied()) {
        Ok(index) => index,
        Err(e) => panic!("invalid fixture names {names:?}: {e}"),
    }
}

/// `[car, pedestrian, bicyclist]`.
pub fn class_index() -> NamedIndex {
    index(&["car", "pedestrian", "bicyclist"])
}

/// `[SpinImage, HOG, Size, Fury]`.
pub fn feature_index() -> NamedIndex {
    index(&["SpinImage", "HOG", "Size", "Fury"])
}

/// Per-class scores for one sample.
///
/// Holds no schema of its own; its owner translates it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Classification {
    pub scores: Vec<f32>,
}

impl Classification {
    pub fn new(scores: Vec<f32>) -> Self {
        Self { scores }
    }

    /// Index of the highest score, or `None` if there are no scores.
    pub fn best(&self) -> Option<usize> {
        self.scores
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
    }
}

impl Translatable for Classification {
    fn check_translator(
        &self,
        id: &str,
        translator: &IndexTranslator,
    ) -> Result<(), TranslateError> {
        if id == CLASSES {
            translator.check_sequence(&self.scores)?;
        }
        Ok(())
    }

    fn apply_translator(
        &mut self,
        id: &str,
        translator: &IndexTranslator,
    ) -> Result<(), TranslateError> {
        if id == CLASSES {
            translator.translate(&mut self.scores, 0.0)?;
        }
        Ok(())
    }
}

/// A batch of labelled samples with class- and feature-indexed state.
///
/// `label_grid` is classes × samples with `+1` in the row of each
/// sample's class and `-1` elsewhere; `label_grid_transposed` is the
/// same data samples × classes.
#[derive(Clone, Debug, Default)]
pub struct Detections {
    pub mappings: MappingTable,
    pub labels: Vec<Option<usize>>,
    pub classifications: Vec<Classification>,
    pub label_grid: Grid<i32>,
    pub label_grid_transposed: Grid<i32>,
    pub feature_weights: SmallVec<[f32; 8]>,
    pub feature_weights_f64: Vec<f64>,
}

impl Detections {
    /// Four samples labelled `[car, car, bicyclist, pedestrian]` against
    /// [`class_index`], with feature weights `[10, 1, 2, 3]` against
    /// [`feature_index`].
    pub fn sample() -> Self {
        let mut d = Detections::default();
        d.apply_mapping(CLASSES, &class_index())
            .unwrap_or_else(|e| panic!("fixture class mapping: {e}"));

        d.labels = vec![Some(0), Some(0), Some(2), Some(1)];
        d.label_grid = Grid::from_fn(3, d.labels.len(), |class, sample| {
            if d.labels[sample] == Some(class) {
                1
            } else {
                -1
            }
        });
        d.label_grid_transposed = d.label_grid.transpose();
        d.classifications = d
            .labels
            .iter()
            .map(|label| {
                let mut scores = vec![0.0; 3];
                if let Some(class) = *label {
                    scores[class] = 1.0;
                }
                Classification::new(scores)
            })
            .collect();

        d.apply_mapping(FEATURES, &feature_index())
            .unwrap_or_else(|e| panic!("fixture feature mapping: {e}"));
        d.feature_weights.copy_from_slice(&[10.0, 1.0, 2.0, 3.0]);
        d.feature_weights_f64.copy_from_slice(&[10.0, 1.0, 2.0, 3.0]);
        d
    }
}

impl Translatable for Detections {
    fn check_translator(
        &self,
        id: &str,
        translator: &IndexTranslator,
    ) -> Result<(), TranslateError> {
        match id {
            CLASSES => {
                translator.check_rows(&self.label_grid)?;
                translator.check_cols(&self.label_grid_transposed)?;
                translator.check_ids(&self.labels)?;
                self.classifications.check_translator(id, translator)?;
            }
            FEATURES => {
                translator.check_sequence(&self.feature_weights)?;
                translator.check_sequence(&self.feature_weights_f64)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn apply_translator(
        &mut self,
        id: &str,
        translator: &IndexTranslator,
    ) -> Result<(), TranslateError> {
        match id {
            CLASSES => {
                translator.translate_rows(&mut self.label_grid, 0)?;
                translator.translate_cols(&mut self.label_grid_transposed, 0)?;
                translator.translate_ids(&mut self.labels)?;
                self.classifications.apply_translator(id, translator)?;
            }
            FEATURES => {
                translator.translate(&mut self.feature_weights, 0.0)?;
                translator.translate(&mut self.feature_weights_f64, 0.0)?;
            }
            _ => {}
        }
        Ok(())
    }
}

impl Mappable for Detections {
    fn mapping_table(&self) -> &MappingTable {
        &self.mappings
    }

    fn mapping_table_mut(&mut self) -> &mut MappingTable {
        &mut self.mappings
    }
}
