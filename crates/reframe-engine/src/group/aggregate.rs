//! Reducing functions over one column within a group

use reframe_types::{DataType, Value};

use crate::EngineError;

/// A reducing function: many values in, one value out.
///
/// Numeric reducers skip Missing; a group with no concrete values reduces
/// to Missing. `Count` counts rows (including missing cells),
/// `CountValues` counts concrete cells only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reducer {
    Count,
    CountValues,
    Sum,
    Mean,
    Min,
    Max,
    First,
    Last,
}

impl Reducer {
    /// Result type for a given input column type.
    ///
    /// Mean always yields Float (105, not 100, for incomes 100 and 110).
    pub fn output_type(&self, input: Option<&DataType>) -> Result<DataType, EngineError> {
        match self {
            Reducer::Count | Reducer::CountValues => Ok(DataType::Integer),
            Reducer::Sum => match input {
                Some(dt @ (DataType::Integer | DataType::Float)) => Ok(dt.clone()),
                Some(dt) => Err(EngineError::InvalidAggregate(format!("sum over {}", dt))),
                None => Err(EngineError::InvalidAggregate("sum needs a column".to_string())),
            },
            Reducer::Mean => match input {
                Some(DataType::Integer | DataType::Float) => Ok(DataType::Float),
                Some(dt) => Err(EngineError::InvalidAggregate(format!("mean over {}", dt))),
                None => Err(EngineError::InvalidAggregate("mean needs a column".to_string())),
            },
            Reducer::Min | Reducer::Max | Reducer::First | Reducer::Last => input
                .cloned()
                .ok_or_else(|| EngineError::InvalidAggregate("reducer needs a column".to_string())),
        }
    }

    /// Reduce the values of one group, in group order
    pub fn reduce(&self, values: &[&Value]) -> Value {
        match self {
            Reducer::Count => Value::Integer(values.len() as i64),
            Reducer::CountValues => {
                Value::Integer(values.iter().filter(|v| !v.is_missing()).count() as i64)
            }
            Reducer::Sum => {
                let mut any = false;
                let mut int_sum: i64 = 0;
                let mut float_sum: f64 = 0.0;
                let mut is_float = false;
                for value in values {
                    match value {
                        Value::Integer(i) => {
                            any = true;
                            int_sum += i;
                        }
                        Value::Float(f) => {
                            any = true;
                            is_float = true;
                            float_sum += f;
                        }
                        _ => {}
                    }
                }
                if !any {
                    Value::Missing
                } else if is_float {
                    Value::Float(float_sum + int_sum as f64)
                } else {
                    Value::Integer(int_sum)
                }
            }
            Reducer::Mean => {
                let concrete: Vec<f64> = values.iter().filter_map(|v| v.as_f64()).collect();
                if concrete.is_empty() {
                    Value::Missing
                } else {
                    Value::Float(concrete.iter().sum::<f64>() / concrete.len() as f64)
                }
            }
            Reducer::Min => values
                .iter()
                .filter(|v| !v.is_missing())
                .min_by(|a, b| a.cmp(b))
                .map(|v| (*v).clone())
                .unwrap_or(Value::Missing),
            Reducer::Max => values
                .iter()
                .filter(|v| !v.is_missing())
                .max_by(|a, b| a.cmp(b))
                .map(|v| (*v).clone())
                .unwrap_or(Value::Missing),
            // First/Last take the positional value verbatim, missing or not
            Reducer::First => values.first().map(|v| (*v).clone()).unwrap_or(Value::Missing),
            Reducer::Last => values.last().map(|v| (*v).clone()).unwrap_or(Value::Missing),
        }
    }
}

/// One summarize output column: a name, a reducer, and the column it reads
/// (None only for row-counting reducers)
#[derive(Debug, Clone)]
pub struct AggSpec {
    pub name: String,
    pub column: Option<String>,
    pub reducer: Reducer,
}

impl AggSpec {
    pub fn new(name: &str, reducer: Reducer, column: Option<&str>) -> AggSpec {
        AggSpec { name: name.to_string(), column: column.map(|c| c.to_string()), reducer }
    }

    pub fn count(name: &str) -> AggSpec {
        AggSpec::new(name, Reducer::Count, None)
    }

    pub fn sum(name: &str, column: &str) -> AggSpec {
        AggSpec::new(name, Reducer::Sum, Some(column))
    }

    pub fn mean(name: &str, column: &str) -> AggSpec {
        AggSpec::new(name, Reducer::Mean, Some(column))
    }

    pub fn min(name: &str, column: &str) -> AggSpec {
        AggSpec::new(name, Reducer::Min, Some(column))
    }

    pub fn max(name: &str, column: &str) -> AggSpec {
        AggSpec::new(name, Reducer::Max, Some(column))
    }

    pub fn first(name: &str, column: &str) -> AggSpec {
        AggSpec::new(name, Reducer::First, Some(column))
    }

    pub fn last(name: &str, column: &str) -> AggSpec {
        AggSpec::new(name, Reducer::Last, Some(column))
    }
}
