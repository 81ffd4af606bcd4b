/// Prediction client: talks to the URL classification service.
///
/// The service exposes one route: `POST /predict` with `{"url": "..."}`,
/// answering `{"prediction": 0|1, "probability": 0.0..=1.0}`. The controller
/// only sees the [`PredictionClient`] trait so tests can swap in a double;
/// [`http::HttpPredictionClient`] is the real transport.
use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod http;

pub use http::HttpPredictionClient;

/// Classifier output for one URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// `0` = safe, `1` = phishing.
    pub prediction: i64,
    /// Confidence of the predicted class, in `[0, 1]`.
    pub probability: f64,
    /// Free-form remark from the service (e.g. allow-listed sites).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ScanResult {
    pub fn new(prediction: i64, probability: f64) -> Self {
        Self {
            prediction,
            probability,
            note: None,
        }
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_prediction(self.prediction)
    }

    /// Reject shapes the renderer can't display meaningfully.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.prediction, 0 | 1) {
            anyhow::bail!(
                "invalid prediction {} (expected 0 or 1)",
                self.prediction
            );
        }
        if !self.probability.is_finite() || !(0.0..=1.0).contains(&self.probability) {
            anyhow::bail!(
                "invalid probability {} (expected a value in [0, 1])",
                self.probability
            );
        }
        Ok(())
    }
}

/// Binary classification label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Safe,
    Phishing,
}

impl Verdict {
    /// Phishing iff the service said `1`; anything else reads as safe.
    pub fn from_prediction(prediction: i64) -> Self {
        if prediction == 1 {
            Self::Phishing
        } else {
            Self::Safe
        }
    }

    pub fn is_phishing(self) -> bool {
        self == Self::Phishing
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Phishing => write!(f, "phishing"),
        }
    }
}

/// Anything that can classify a URL.
///
/// One attempt per call, no retries. Errors cover transport failures,
/// non-success statuses and malformed bodies alike.
pub trait PredictionClient {
    fn predict(&self, url: &str) -> Result<ScanResult>;

    /// Check that the service answers at all, returning the HTTP status it
    /// replied with. Clients without a network transport can't be probed.
    fn probe(&self) -> Result<u16> {
        anyhow::bail!("this client does not support health probes")
    }
}

impl<T: PredictionClient + ?Sized> PredictionClient for &T {
    fn predict(&self, url: &str) -> Result<ScanResult> {
        (**self).predict(url)
    }

    fn probe(&self) -> Result<u16> {
        (**self).probe()
    }
}
