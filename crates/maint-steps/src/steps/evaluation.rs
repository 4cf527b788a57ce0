//! Steps de evaluación: predicción sobre test y métricas de clasificación.

use indexmap::IndexMap;
use maint_core::{CoreError, ModelBlob, Payload, PipelineStep, StepOutput, Table};

use super::training::{feature_rows, target_vector, LinearModel};

/// Decodifica el modelo ajustado, predice sobre el conjunto de test y emite
/// un mapa de métricas más el vector de predicciones.
pub struct ModelEvaluator {
    pub model: ModelBlob,
    pub x_test: Table,
    pub y_test: Table,
}

impl PipelineStep for ModelEvaluator {
    fn invoke(self: Box<Self>) -> Result<Option<StepOutput>, CoreError> {
        let model: LinearModel = bincode::deserialize(&self.model.bytes)
            .map_err(|e| CoreError::Codec(format!("model blob ({}): {}", self.model.algo, e)))?;

        let rows = feature_rows(&self.x_test);
        let targets = target_vector(&self.y_test);
        if rows.is_empty() {
            return Err(CoreError::EmptyArtifact {
                location: "evaluation dataset".to_string(),
            });
        }

        let predictions: Vec<f64> = rows
            .iter()
            .map(|row| if model.predict_proba(row) > 0.5 { 1.0 } else { 0.0 })
            .collect();
        let hits = predictions
            .iter()
            .zip(&targets)
            .filter(|(p, t)| *p == *t)
            .count();
        let n = predictions.len().min(targets.len()).max(1);
        let accuracy = hits as f64 / n as f64;

        log::info!("evaluation: accuracy {:.3} over {} rows", accuracy, n);

        let mut metrics = IndexMap::new();
        metrics.insert("accuracy".to_string(), accuracy);
        metrics.insert("error_rate".to_string(), 1.0 - accuracy);
        metrics.insert("n_test".to_string(), n as f64);

        let mut out = IndexMap::new();
        out.insert("eval-metrics".to_string(), Payload::Mapping(metrics));
        out.insert("y-test-pred".to_string(), Payload::Array(predictions));
        Ok(Some(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maint_core::Cell;

    #[test]
    fn evaluation_scores_a_known_model() {
        let model = LinearModel {
            feature_names: vec!["s1".to_string()],
            weights: vec![10.0],
            bias: 0.0,
        };
        let blob = ModelBlob {
            algo: "logistic-gd".to_string(),
            bytes: bincode::serialize(&model).expect("encode"),
        };
        let x = Table::from_columns(vec![(
            "s1".to_string(),
            vec![Cell::Float(-1.0), Cell::Float(1.0)],
        )]);
        let y = Table::from_columns(vec![(
            "target".to_string(),
            vec![Cell::Int(0), Cell::Int(1)],
        )]);

        let step = Box::new(ModelEvaluator {
            model: blob,
            x_test: x,
            y_test: y,
        });
        let out = step.invoke().expect("invoke").expect("outputs");

        match out.get("eval-metrics") {
            Some(Payload::Mapping(metrics)) => {
                assert_eq!(metrics.get("accuracy"), Some(&1.0));
                assert_eq!(metrics.get("n_test"), Some(&2.0));
            }
            other => panic!("expected mapping, got {:?}", other),
        }
        assert_eq!(
            out.get("y-test-pred"),
            Some(&Payload::Array(vec![0.0, 1.0]))
        );
    }

    #[test]
    fn corrupt_model_blob_is_a_codec_error() {
        let step = Box::new(ModelEvaluator {
            model: ModelBlob {
                algo: "logistic-gd".to_string(),
                bytes: vec![0xFF],
            },
            x_test: Table::from_columns(vec![("s1".to_string(), vec![Cell::Float(0.0)])]),
            y_test: Table::from_columns(vec![("target".to_string(), vec![Cell::Int(0)])]),
        });
        assert!(matches!(step.invoke(), Err(CoreError::Codec(_))));
    }
}
