//! Token identity and amount types.
//!
//! A token is identified by the account that issues it plus its symbol
//! (`code` + decimal `precision`). Amounts are signed 64-bit integers in the
//! token's smallest unit, always tagged with the symbol they are denominated
//! in. Every type here round-trips through its text form, which is also how
//! it is serialized:
//!
//! ```text
//! Symbol          4,EOS
//! Name            eosio.token
//! Asset           4638.5353 EOS
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest precision whose scale factor `10^p` still fits in an `i64`.
pub const MAX_PRECISION: u8 = 18;

const MAX_CODE_LEN: usize = 7;
const MAX_NAME_LEN: usize = 12;

// ─── SymbolCode ───────────────────────────────────────────────────────────────

/// Ticker code of a token: 1–7 uppercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SymbolCode(String);

impl SymbolCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SymbolCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s.len() > MAX_CODE_LEN {
            return Err(Error::parse(s, "symbol code must be 1-7 characters"));
        }
        if !s.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(Error::parse(s, "symbol code must be uppercase A-Z"));
        }
        Ok(SymbolCode(s.to_string()))
    }
}

impl TryFrom<String> for SymbolCode {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<SymbolCode> for String {
    fn from(code: SymbolCode) -> String {
        code.0
    }
}

impl fmt::Display for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Symbol ───────────────────────────────────────────────────────────────────

/// Token symbol: code plus decimal precision. `"4,EOS"` and `"8,EOS"` are
/// different symbols.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol {
    precision: u8,
    code:      SymbolCode,
}

impl Symbol {
    pub fn new(precision: u8, code: SymbolCode) -> Result<Self> {
        if precision > MAX_PRECISION {
            return Err(Error::parse(
                &format!("{precision},{code}"),
                format!("precision must be at most {MAX_PRECISION}"),
            ));
        }
        Ok(Symbol { precision, code })
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    pub fn code(&self) -> &SymbolCode {
        &self.code
    }

    /// `10^precision`, the number of raw units in one display unit.
    pub fn scale(&self) -> i64 {
        10i64.pow(u32::from(self.precision))
    }
}

impl FromStr for Symbol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (precision, code) = s
            .split_once(',')
            .ok_or_else(|| Error::parse(s, "expected \"<precision>,<CODE>\""))?;
        let precision: u8 = precision
            .trim()
            .parse()
            .map_err(|_| Error::parse(s, "precision is not an integer"))?;
        Symbol::new(precision, code.trim().parse()?)
    }
}

impl TryFrom<String> for Symbol {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Symbol> for String {
    fn from(sym: Symbol) -> String {
        sym.to_string()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

// ─── Name ─────────────────────────────────────────────────────────────────────

/// Account name of a token's issuing contract, e.g. `eosio.token`.
///
/// 1–12 characters drawn from `a-z`, `1-5` and `.`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Name {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s.len() > MAX_NAME_LEN {
            return Err(Error::parse(s, "account name must be 1-12 characters"));
        }
        let valid = s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || (b'1'..=b'5').contains(&b) || b == b'.');
        if !valid {
            return Err(Error::parse(s, "account name may only contain a-z, 1-5 and '.'"));
        }
        Ok(Name(s.to_string()))
    }
}

impl TryFrom<String> for Name {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Name> for String {
    fn from(name: Name) -> String {
        name.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── ExtendedSymbol ───────────────────────────────────────────────────────────

/// Token reference: issuing contract plus symbol.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExtendedSymbol {
    pub contract: Name,
    pub symbol:   Symbol,
}

impl ExtendedSymbol {
    pub fn new(contract: Name, symbol: Symbol) -> Self {
        ExtendedSymbol { contract, symbol }
    }
}

impl fmt::Display for ExtendedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.symbol, self.contract)
    }
}

// ─── Asset ────────────────────────────────────────────────────────────────────

/// A raw amount tagged with the symbol it is denominated in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Asset {
    pub amount: i64,
    pub symbol: Symbol,
}

impl Asset {
    pub fn new(amount: i64, symbol: Symbol) -> Self {
        Asset { amount, symbol }
    }

    pub fn zero(symbol: Symbol) -> Self {
        Asset { amount: 0, symbol }
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Checked addition. `None` on overflow or when the symbols differ.
    pub fn checked_add(&self, other: &Asset) -> Option<Asset> {
        if self.symbol != other.symbol {
            return None;
        }
        Some(Asset::new(self.amount.checked_add(other.amount)?, self.symbol.clone()))
    }

    /// Amount in display units (`amount / 10^precision`).
    pub fn to_display(&self) -> f64 {
        self.amount as f64 / self.symbol.scale() as f64
    }
}

impl FromStr for Asset {
    type Err = Error;

    /// Parse `"<amount> <CODE>"`; precision is the number of fraction digits.
    fn from_str(s: &str) -> Result<Self> {
        let (number, code) = s
            .trim()
            .split_once(' ')
            .ok_or_else(|| Error::parse(s, "expected \"<amount> <CODE>\""))?;
        let code: SymbolCode = code.trim().parse()?;

        let (negative, digits) = match number.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, number),
        };
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::parse(s, "amount must be a decimal number"));
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::parse(s, "amount must be a decimal number"));
        }
        let precision = u8::try_from(frac.len())
            .map_err(|_| Error::parse(s, "too many fraction digits"))?;
        let symbol = Symbol::new(precision, code)?;

        let overflow = || Error::parse(s, "amount out of range");
        let whole: u64 = whole.parse().map_err(|_| overflow())?;
        let frac: u64 = if frac.is_empty() { 0 } else { frac.parse().map_err(|_| overflow())? };
        let magnitude = whole
            .checked_mul(symbol.scale().unsigned_abs())
            .and_then(|w| w.checked_add(frac))
            .ok_or_else(overflow)?;

        // i64::MIN has no positive counterpart, so negate in i128.
        let signed = if negative { -i128::from(magnitude) } else { i128::from(magnitude) };
        let amount = i64::try_from(signed).map_err(|_| overflow())?;
        Ok(Asset::new(amount, symbol))
    }
}

impl TryFrom<String> for Asset {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Asset> for String {
    fn from(asset: Asset) -> String {
        asset.to_string()
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount < 0 { "-" } else { "" };
        let magnitude = self.amount.unsigned_abs();
        let precision = usize::from(self.symbol.precision);
        if precision == 0 {
            return write!(f, "{sign}{magnitude} {}", self.symbol.code);
        }
        let scale = self.symbol.scale().unsigned_abs();
        write!(
            f,
            "{sign}{}.{:0width$} {}",
            magnitude / scale,
            magnitude % scale,
            self.symbol.code,
            width = precision,
        )
    }
}

// ─── Query results ────────────────────────────────────────────────────────────

/// Pool reserves plus display-unit spot price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolInfo {
    pub pair_id:     u64,
    pub token1:      ExtendedSymbol,
    pub token2:      ExtendedSymbol,
    pub reserve1:    Asset,
    pub reserve2:    Asset,
    /// `token2` per `token1` in display units; 0 when `reserve1` is empty.
    pub spot_price:  f64,
    pub swap_weight: f32,
}

/// Why a trade earns nothing without the reward math running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ineligible {
    /// Neither side of the trade is the anchor token.
    NoAnchorSide,
    /// No pool record for the pair id.
    UnknownPair,
    /// The pool's swap weight is zero.
    ZeroWeight,
}

/// Full breakdown of a reward estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardEstimate {
    pub pair_id:         u64,
    /// Set when the trade was rejected before the compounding loop.
    pub ineligible:      Option<Ineligible>,
    pub elapsed_seconds: f64,
    /// Decayed, weight-scaled pool size before the first step.
    pub total:           u128,
    pub steps:           u64,
    /// Pool size after the last step.
    pub total_after:     u128,
    pub reward:          Asset,
}

impl RewardEstimate {
    pub(crate) fn ineligible(pair_id: u64, reason: Ineligible, reward_symbol: Symbol) -> Self {
        RewardEstimate {
            pair_id,
            ineligible: Some(reason),
            elapsed_seconds: 0.0,
            total: 0,
            steps: 0,
            total_after: 0,
            reward: Asset::zero(reward_symbol),
        }
    }
}
