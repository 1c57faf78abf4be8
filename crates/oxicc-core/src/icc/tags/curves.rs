//! Curve Tag Type (curv)
//!
//! See ICC.1:2022 Section 10.6

use crate::icc::error::IccError;
use crate::icc::types::{TypeSignature, U8Fixed8, read_u16, read_u32};

/// Curve tag data (curv type)
#[derive(Debug, Clone, PartialEq)]
pub enum CurveData {
    /// Identity curve (count = 0)
    Identity,
    /// Simple gamma (count = 1, value is u8Fixed8)
    Gamma(f64),
    /// Lookup table (count > 1, values are u16)
    Table(Vec<u16>),
}

/// Nodes sampled when estimating an exponent
const ESTIMATE_NODES: usize = 4096;

impl CurveData {
    /// Parse curve data from bytes (after type signature and reserved bytes)
    pub fn parse(body: &[u8]) -> Result<Self, IccError> {
        let count = read_u32(body, 0)
            .ok_or_else(|| IccError::CorruptedData("Curve tag too small".to_string()))?
            as usize;

        match count {
            0 => Ok(CurveData::Identity),
            1 => {
                let raw = read_u16(body, 4).ok_or_else(|| {
                    IccError::CorruptedData("Curve gamma value missing".to_string())
                })?;
                Ok(CurveData::Gamma(U8Fixed8(raw).to_f64()))
            }
            _ => {
                let required_len = count.saturating_mul(2).saturating_add(4);
                if body.len() < required_len {
                    return Err(IccError::CorruptedData(format!(
                        "Curve table too small: need {} bytes, have {}",
                        required_len,
                        body.len()
                    )));
                }

                let table = body[4..required_len]
                    .chunks_exact(2)
                    .map(|c| u16::from_be_bytes([c[0], c[1]]))
                    .collect();
                Ok(CurveData::Table(table))
            }
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&TypeSignature::CURVE.0.to_be_bytes());
        out.extend_from_slice(&[0; 4]);
        match self {
            CurveData::Identity => out.extend_from_slice(&0u32.to_be_bytes()),
            CurveData::Gamma(g) => {
                out.extend_from_slice(&1u32.to_be_bytes());
                out.extend_from_slice(&U8Fixed8::from_f64(*g).0.to_be_bytes());
            }
            CurveData::Table(table) => {
                out.extend_from_slice(&(table.len() as u32).to_be_bytes());
                for v in table {
                    out.extend_from_slice(&v.to_be_bytes());
                }
            }
        }
        out
    }

    /// Evaluate the curve at a given input (0.0 to 1.0)
    pub fn eval(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);

        match self {
            CurveData::Identity => x,
            CurveData::Gamma(g) => x.powf(*g),
            CurveData::Table(table) => {
                if table.is_empty() {
                    return x;
                }
                if table.len() == 1 {
                    return table[0] as f64 / 65535.0;
                }

                // Linear interpolation in the table
                let pos = x * (table.len() - 1) as f64;
                let idx = pos.floor() as usize;
                let frac = pos - idx as f64;

                if idx >= table.len() - 1 {
                    return table[table.len() - 1] as f64 / 65535.0;
                }

                let v0 = table[idx] as f64;
                let v1 = table[idx + 1] as f64;
                (v0 + frac * (v1 - v0)) / 65535.0
            }
        }
    }

    /// Fit a pure power law to the curve
    ///
    /// Samples the open interval, ignoring the toe below 7% where linear
    /// segments live, and gives up when the per-sample exponents spread
    /// by more than `precision` standard deviations.
    pub fn estimate_gamma(&self, precision: f64) -> Option<f64> {
        let mut sum = 0.0;
        let mut sum2 = 0.0;
        let mut n = 0.0;

        for i in 1..ESTIMATE_NODES - 1 {
            let x = i as f64 / (ESTIMATE_NODES - 1) as f64;
            let y = self.eval(x);
            if y > 0.0 && y < 1.0 && x > 0.07 {
                let gamma = y.ln() / x.ln();
                sum += gamma;
                sum2 += gamma * gamma;
                n += 1.0;
            }
        }

        if n < 2.0 {
            return None;
        }

        let variance = (n * sum2 - sum * sum) / (n * (n - 1.0));
        if variance.max(0.0).sqrt() > precision {
            return None;
        }
        Some(sum / n)
    }
}
