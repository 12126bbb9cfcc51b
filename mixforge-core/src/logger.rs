use crate::{error::MixforgeError, evaluator::PredictionResult};
use csv::{Writer, WriterBuilder};
use mixforge_schemas::{classification::StrengthClass, mix::MixDesign};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    path::Path,
};

/// One row of the evaluation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub evaluated_at: String,
    pub cement: f64,
    pub blast_furnace_slag: f64,
    pub fly_ash: f64,
    pub water: f64,
    pub superplasticizer: f64,
    pub coarse_aggregate: f64,
    pub fine_aggregate: f64,
    pub age: u32,
    pub water_cement_ratio: f64,
    pub total_cementitious: f64,
    pub total_aggregate: f64,
    pub aggregate_ratio: f64,
    pub predicted_strength_mpa: f64,
    pub strength_class: StrengthClass,
    pub suggestions_json: String,
    pub out_of_training_range_json: String,
}

impl EvaluationRecord {
    pub fn new(
        evaluated_at: String,
        mix: &MixDesign,
        result: &PredictionResult,
    ) -> Result<Self, anyhow::Error> {
        Ok(Self {
            evaluated_at,
            cement: mix.cement,
            blast_furnace_slag: mix.blast_furnace_slag,
            fly_ash: mix.fly_ash,
            water: mix.water,
            superplasticizer: mix.superplasticizer,
            coarse_aggregate: mix.coarse_aggregate,
            fine_aggregate: mix.fine_aggregate,
            age: mix.curing_age_days,
            water_cement_ratio: result.derived.water_cement_ratio,
            total_cementitious: result.derived.total_cementitious,
            total_aggregate: result.derived.total_aggregate,
            aggregate_ratio: result.derived.aggregate_ratio,
            predicted_strength_mpa: result.predicted_strength_mpa,
            strength_class: result.strength_class,
            suggestions_json: serde_json::to_string(&result.suggestions)?,
            out_of_training_range_json: serde_json::to_string(&result.out_of_training_range)?,
        })
    }
}

/// Appends one CSV row per evaluation. The header is only written to new files.
pub struct EvaluationLogger {
    writer: Writer<fs::File>,
    path: String,
}

impl EvaluationLogger {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MixforgeError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let is_new = fs::metadata(path).map_or(true, |m| m.len() == 0);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| MixforgeError::FileIO(display.clone(), e))?;
        let writer = WriterBuilder::new().has_headers(is_new).from_writer(file);

        Ok(Self {
            writer,
            path: display,
        })
    }

    pub fn log_evaluation(
        &mut self,
        mix: &MixDesign,
        result: &PredictionResult,
    ) -> Result<(), MixforgeError> {
        let evaluated_at = chrono::Utc::now().to_rfc3339();
        let record = EvaluationRecord::new(evaluated_at, mix, result)?;
        self.write_record(&record)
    }

    pub fn write_record(&mut self, record: &EvaluationRecord) -> Result<(), MixforgeError> {
        self.writer
            .serialize(record)
            .map_err(|e| MixforgeError::CsvError(self.path.clone(), e))?;
        self.writer
            .flush()
            .map_err(|e| MixforgeError::FileIO(self.path.clone(), e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{evaluator::MixEvaluator, predictor::Predictor};
    use mixforge_schemas::{feature::FeatureVector, suggestion::Suggestion};

    struct FixedPredictor(f64);

    impl Predictor for FixedPredictor {
        fn predict(&self, _features: &FeatureVector) -> f64 {
            self.0
        }
    }

    fn read_records(path: &Path) -> Vec<EvaluationRecord> {
        let mut reader = csv::Reader::from_path(path).unwrap();
        reader.deserialize().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn appends_rows_with_a_single_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evaluations.csv");
        let evaluator = MixEvaluator::new(FixedPredictor(52.0));
        let mix = MixDesign::default();
        let result = evaluator.evaluate(&mix).unwrap();

        {
            let mut logger = EvaluationLogger::open(&path).unwrap();
            logger.log_evaluation(&mix, &result).unwrap();
        }
        {
            let mut logger = EvaluationLogger::open(&path).unwrap();
            logger.log_evaluation(&mix, &result).unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("evaluated_at").count(), 1);

        let records = read_records(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].strength_class, StrengthClass::High);
        assert!(content.lines().nth(1).unwrap().contains(",high,"));
        assert_eq!(records[0].age, 28);
        assert_eq!(records[1].predicted_strength_mpa, 52.0);

        let suggestions: Vec<Suggestion> =
            serde_json::from_str(&records[0].suggestions_json).unwrap();
        assert_eq!(suggestions, vec![Suggestion::ReduceWater]);
        assert_eq!(records[0].out_of_training_range_json, "[]");
    }

    #[test]
    fn open_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("log.csv");
        assert!(matches!(
            EvaluationLogger::open(&path),
            Err(MixforgeError::FileIO(_, _))
        ));
    }
}
