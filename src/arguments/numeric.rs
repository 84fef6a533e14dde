use crate::errors::{BuiltInErrorKind, CommandSyntaxError};
use crate::string_reader::{Numeric, StringReader};

use super::ArgumentType;

/// A bounded numeric argument, generic over any [`Numeric`] primitive.
/// `min`/`max` are inclusive; a value outside them is rejected with the
/// cursor restored to the start of the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberArgumentType<T> {
    min: Option<T>,
    max: Option<T>,
}

impl<T: Numeric> NumberArgumentType<T> {
    pub fn new() -> Self {
        Self { min: None, max: None }
    }

    pub fn with_min(mut self, min: T) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: T) -> Self {
        self.max = Some(max);
        self
    }

    pub fn min(&self) -> Option<T> {
        self.min
    }

    pub fn max(&self) -> Option<T> {
        self.max
    }
}

impl<S, T> ArgumentType<S> for NumberArgumentType<T>
where
    S: Send + Sync + 'static,
    T: Numeric,
{
    type Value = T;

    fn parse(&self, reader: &mut StringReader) -> Result<T, CommandSyntaxError> {
        let start = reader.cursor();
        let result: T = reader.read_value()?;
        if let Some(min) = self.min {
            if result < min {
                reader.set_cursor(start);
                return Err(BuiltInErrorKind::ValueTooLow {
                    min: min.to_string(),
                    found: result.to_string(),
                }
                .create_with_context(reader));
            }
        }
        if let Some(max) = self.max {
            if result > max {
                reader.set_cursor(start);
                return Err(BuiltInErrorKind::ValueTooHigh {
                    max: max.to_string(),
                    found: result.to_string(),
                }
                .create_with_context(reader));
            }
        }
        Ok(result)
    }

    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn examples(&self) -> Vec<String> {
        vec!["0".into(), "1".into(), "-1".into()]
    }
}

pub type IntegerArgumentType = NumberArgumentType<i32>;
pub type LongArgumentType = NumberArgumentType<i64>;
pub type FloatArgumentType = NumberArgumentType<f32>;
pub type DoubleArgumentType = NumberArgumentType<f64>;

pub fn integer() -> IntegerArgumentType {
    NumberArgumentType::new()
}

pub fn long() -> LongArgumentType {
    NumberArgumentType::new()
}

pub fn float() -> FloatArgumentType {
    NumberArgumentType::new()
}

pub fn double() -> DoubleArgumentType {
    NumberArgumentType::new()
}
