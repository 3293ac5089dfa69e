//! Hash implementation for Value
//!
//! Custom implementation so values can key hash indexes (grouping, joins):
//! - floats hash via to_bits with NaN normalized to a single bit pattern
//! - categorical values hash by code (level position)
//! - Missing hashes on the discriminant alone

use std::hash::{Hash, Hasher};

use crate::Value;

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        use Value::*;

        std::mem::discriminant(self).hash(state);

        match self {
            Integer(i) => i.hash(state),
            Float(f) => {
                if f.is_nan() {
                    f64::NAN.to_bits().hash(state);
                } else if *f == 0.0 {
                    // -0.0 == 0.0, so they must hash alike
                    0f64.to_bits().hash(state);
                } else {
                    f.to_bits().hash(state);
                }
            }
            Boolean(b) => b.hash(state),
            Text(s) => s.hash(state),
            Categorical { code, .. } => code.hash(state),
            Date(d) => d.hash(state),
            Timestamp(ts) => ts.hash(state),
            Missing => {}
        }
    }
}
