// src/core/calculator.rs
use crate::error::CalcError;
use crate::utils::format_number;
use std::f64::consts::{E, PI};
use tracing::trace;

/// Largest n whose factorial is finite in an f64.
const MAX_FACTORIAL: u32 = 170;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    fn apply(self, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Subtract => Ok(lhs - rhs),
            Self::Multiply => Ok(lhs * rhs),
            Self::Divide if rhs == 0.0 => Err(CalcError::DivisionByZero),
            Self::Divide => Ok(lhs / rhs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScientificFn {
    Sin,
    Cos,
    Tan,
    Log10,
    Ln,
    Sqrt,
    Square,
    Factorial,
}

impl ScientificFn {
    const fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log10 => "log",
            Self::Ln => "ln",
            Self::Sqrt => "sqrt",
            Self::Square => "square",
            Self::Factorial => "factorial",
        }
    }

    /// Trigonometric functions take degrees.
    fn apply(self, x: f64) -> Result<f64, CalcError> {
        let domain = || CalcError::Domain {
            function: self.name(),
            value: format_number(x),
        };
        match self {
            Self::Sin => Ok(x.to_radians().sin()),
            Self::Cos => Ok(x.to_radians().cos()),
            Self::Tan => Ok(x.to_radians().tan()),
            Self::Log10 if x <= 0.0 => Err(domain()),
            Self::Log10 => Ok(x.log10()),
            Self::Ln if x <= 0.0 => Err(domain()),
            Self::Ln => Ok(x.ln()),
            Self::Sqrt if x < 0.0 => Err(domain()),
            Self::Sqrt => Ok(x.sqrt()),
            Self::Square => Ok(x * x),
            Self::Factorial => factorial(x).ok_or_else(domain),
        }
    }
}

fn factorial(x: f64) -> Option<f64> {
    if x < 0.0 || x.fract() != 0.0 || x > f64::from(MAX_FACTORIAL) {
        return None;
    }
    let n = format_number(x).parse::<u32>().ok()?;
    Some((2..=n).map(f64::from).product())
}

/// One keypress on the calculator's keypad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Key {
    Digit(u8),
    Decimal,
    Operator(Operator),
    Equals,
    Clear,
    ToggleSign,
    Percent,
    Function(ScientificFn),
    Constant(f64),
}

impl Key {
    /// Parses a single key label. Accepts both keypad glyphs and ASCII spellings.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::UnknownKey`] for anything unrecognised.
    pub fn parse(label: &str) -> Result<Self, CalcError> {
        let key = match label {
            "." => Self::Decimal,
            "+" => Self::Operator(Operator::Add),
            "-" | "−" => Self::Operator(Operator::Subtract),
            "*" | "x" | "×" => Self::Operator(Operator::Multiply),
            "/" | "÷" => Self::Operator(Operator::Divide),
            "=" => Self::Equals,
            "C" | "c" | "clear" => Self::Clear,
            "±" | "neg" => Self::ToggleSign,
            "%" => Self::Percent,
            "sin" => Self::Function(ScientificFn::Sin),
            "cos" => Self::Function(ScientificFn::Cos),
            "tan" => Self::Function(ScientificFn::Tan),
            "log" => Self::Function(ScientificFn::Log10),
            "ln" => Self::Function(ScientificFn::Ln),
            "√" | "sqrt" => Self::Function(ScientificFn::Sqrt),
            "x²" | "sq" => Self::Function(ScientificFn::Square),
            "x!" | "!" | "fact" => Self::Function(ScientificFn::Factorial),
            "π" | "pi" => Self::Constant(PI),
            "e" => Self::Constant(E),
            _ => {
                let digit = label
                    .chars()
                    .next()
                    .filter(|_| label.chars().count() == 1)
                    .and_then(|c| c.to_digit(10))
                    .and_then(|d| u8::try_from(d).ok());
                return digit
                    .map(Self::Digit)
                    .ok_or_else(|| CalcError::UnknownKey(label.to_owned()));
            }
        };
        Ok(key)
    }
}

/// Keypad calculator state: operations apply left to right as keys arrive.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    display: String,
    previous: Option<f64>,
    operation: Option<Operator>,
    waiting_for_operand: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            display: String::from("0"),
            previous: None,
            operation: None,
            waiting_for_operand: false,
        }
    }

    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    fn current(&self) -> f64 {
        self.display.parse().unwrap_or(0.0)
    }

    fn show(&mut self, value: f64) {
        self.display = format_number(value);
    }

    pub fn input_digit(&mut self, digit: u8) {
        let digit = char::from(b'0'.saturating_add(digit.min(9)));
        if self.waiting_for_operand {
            self.display = digit.to_string();
            self.waiting_for_operand = false;
        } else if self.display == "0" {
            self.display = digit.to_string();
        } else {
            self.display.push(digit);
        }
    }

    pub fn input_decimal(&mut self) {
        if self.waiting_for_operand {
            self.display = String::from("0.");
            self.waiting_for_operand = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn toggle_sign(&mut self) {
        let value = -self.current();
        self.show(value);
    }

    pub fn percent(&mut self) {
        let value = self.current() / 100.0;
        self.show(value);
    }

    /// Applies any pending operation and queues `next`.
    ///
    /// Pressing a second operator before typing an operand just replaces the
    /// queued one.
    ///
    /// # Errors
    ///
    /// [`CalcError::DivisionByZero`]; the state is left untouched.
    pub fn perform_operation(&mut self, next: Operator) -> Result<(), CalcError> {
        if self.waiting_for_operand && self.operation.is_some() {
            self.operation = Some(next);
            return Ok(());
        }

        let input = self.current();
        match (self.previous, self.operation) {
            (Some(previous), Some(operation)) => {
                let result = operation.apply(previous, input)?;
                self.show(result);
                self.previous = Some(result);
            }
            _ => self.previous = Some(input),
        }
        self.waiting_for_operand = true;
        self.operation = Some(next);
        Ok(())
    }

    /// # Errors
    ///
    /// [`CalcError::DivisionByZero`]; the state is left untouched.
    pub fn equals(&mut self) -> Result<(), CalcError> {
        if let (Some(previous), Some(operation)) = (self.previous, self.operation) {
            let result = operation.apply(previous, self.current())?;
            trace!(previous, ?operation, result, "evaluated");
            self.show(result);
            self.previous = None;
            self.operation = None;
            self.waiting_for_operand = true;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// [`CalcError::Domain`] when the displayed value is outside the
    /// function's domain.
    pub fn apply(&mut self, function: ScientificFn) -> Result<(), CalcError> {
        let result = function.apply(self.current())?;
        self.show(result);
        self.waiting_for_operand = true;
        Ok(())
    }

    pub fn constant(&mut self, value: f64) {
        self.show(value);
        self.waiting_for_operand = true;
    }

    /// # Errors
    ///
    /// Whatever the pressed key's operation returns.
    pub fn press(&mut self, key: Key) -> Result<(), CalcError> {
        match key {
            Key::Digit(d) => self.input_digit(d),
            Key::Decimal => self.input_decimal(),
            Key::Operator(op) => self.perform_operation(op)?,
            Key::Equals => self.equals()?,
            Key::Clear => self.clear(),
            Key::ToggleSign => self.toggle_sign(),
            Key::Percent => self.percent(),
            Key::Function(function) => self.apply(function)?,
            Key::Constant(value) => self.constant(value),
        }
        Ok(())
    }
}

/// Replays a sequence of tokens and returns the final display.
///
/// A token is either a key label understood by [`Key::parse`] or a number
/// like `12.5` / `-3`, which is typed digit by digit.
///
/// # Errors
///
/// Unknown tokens and any [`CalcError`] raised along the way.
pub fn evaluate_keys<S: AsRef<str>>(tokens: &[S]) -> Result<String, CalcError> {
    let mut calculator = Calculator::new();
    for token in tokens {
        let token = token.as_ref().trim();
        if is_number(token) {
            let (negative, digits) = token
                .strip_prefix('-')
                .map_or((false, token), |rest| (true, rest));
            for c in digits.chars() {
                if c == '.' {
                    calculator.input_decimal();
                } else if let Some(d) = c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                    calculator.input_digit(d);
                }
            }
            if negative {
                calculator.toggle_sign();
            }
        } else {
            calculator.press(Key::parse(token)?)?;
        }
    }
    Ok(calculator.display().to_owned())
}

fn is_number(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_basic_arithmetic() -> Result<()> {
        assert_eq!(evaluate_keys(&["2", "+", "3", "="])?, "5");
        assert_eq!(evaluate_keys(&["7", "-", "10", "="])?, "-3");
        assert_eq!(evaluate_keys(&["6", "×", "7", "="])?, "42");
        assert_eq!(evaluate_keys(&["1", "÷", "4", "="])?, "0.25");
        Ok(())
    }

    #[test]
    fn test_chained_operations_apply_left_to_right() -> Result<()> {
        assert_eq!(evaluate_keys(&["2", "+", "3", "*", "4", "="])?, "20");
        Ok(())
    }

    #[test]
    fn test_repeated_operator_replaces_pending() -> Result<()> {
        assert_eq!(evaluate_keys(&["2", "+", "*", "5", "="])?, "10");
        Ok(())
    }

    #[test]
    fn test_decimal_entry() -> Result<()> {
        let mut calc = Calculator::new();
        calc.input_decimal();
        calc.input_digit(5);
        calc.input_decimal();
        calc.input_digit(2);
        assert_eq!(calc.display(), "0.52");
        assert_eq!(evaluate_keys(&["0.1", "+", "0.2", "="])?, "0.30000000000000004");
        Ok(())
    }

    #[test]
    fn test_division_by_zero_keeps_state() {
        let mut calc = Calculator::new();
        calc.input_digit(8);
        assert!(calc.perform_operation(Operator::Divide).is_ok());
        calc.input_digit(0);
        let before = calc.clone();
        assert_eq!(calc.equals(), Err(CalcError::DivisionByZero));
        assert_eq!(calc, before);
    }

    #[test]
    fn test_sign_and_percent() -> Result<()> {
        assert_eq!(evaluate_keys(&["5", "±"])?, "-5");
        assert_eq!(evaluate_keys(&["-5"])?, "-5");
        assert_eq!(evaluate_keys(&["50", "%"])?, "0.5");
        assert_eq!(evaluate_keys(&["0", "±"])?, "0");
        Ok(())
    }

    #[test]
    fn test_scientific_functions() -> Result<()> {
        assert_eq!(evaluate_keys(&["90", "sin"])?, "1");
        assert_eq!(evaluate_keys(&["100", "log"])?, "2");
        assert_eq!(evaluate_keys(&["9", "√"])?, "3");
        assert_eq!(evaluate_keys(&["12", "x²"])?, "144");
        assert_eq!(evaluate_keys(&["5", "x!"])?, "120");
        assert_eq!(evaluate_keys(&["0", "x!"])?, "1");
        Ok(())
    }

    #[test]
    fn test_display_switches_to_exponent_form() -> Result<()> {
        assert_eq!(evaluate_keys(&["180", "sin"])?, "1.2246467991473532e-16");
        assert_eq!(
            evaluate_keys(&["1000000000", "×", "1000000000000", "="])?,
            "1e+21"
        );
        assert_eq!(
            evaluate_keys(&["1000000000", "×", "1000000000000", "×", "2", "="])?,
            "2e+21"
        );
        Ok(())
    }

    #[test]
    fn test_scientific_domain_errors() {
        assert!(matches!(
            evaluate_keys(&["-4", "sqrt"]),
            Err(CalcError::Domain { function: "sqrt", .. })
        ));
        assert!(evaluate_keys(&["0", "ln"]).is_err());
        assert!(evaluate_keys(&["2.5", "x!"]).is_err());
        assert!(evaluate_keys(&["171", "x!"]).is_err());
    }

    #[test]
    fn test_constants_start_new_operand() -> Result<()> {
        let display = evaluate_keys(&["π"])?;
        assert!(display.starts_with("3.14159"));
        assert_eq!(evaluate_keys(&["pi", "4"])?, "4");
        Ok(())
    }

    #[test]
    fn test_clear_resets() -> Result<()> {
        assert_eq!(evaluate_keys(&["9", "+", "1", "C"])?, "0");
        Ok(())
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            evaluate_keys(&["2", "^", "3"]),
            Err(CalcError::UnknownKey(String::from("^")))
        );
    }
}
