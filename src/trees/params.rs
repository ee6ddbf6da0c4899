use crate::error::TreeError;

#[derive(Clone, Debug)]
pub struct TreeParams {
    pub confidence_level: f64,
    pub min_bucket_size: usize,
    pub max_small_bucket_ratio: f64,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeParams {
    pub fn new() -> Self {
        Self {
            confidence_level: 0.99,
            min_bucket_size: 5,
            max_small_bucket_ratio: 0.2,
        }
    }

    pub fn set_confidence_level(&mut self, confidence_level: f64) -> Result<(), TreeError> {
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(TreeError::InvalidParameter(
                "The confidence level must lie strictly between 0 and 1.".into(),
            ));
        }
        self.confidence_level = confidence_level;
        Ok(())
    }

    pub fn set_min_bucket_size(&mut self, min_bucket_size: usize) -> Result<(), TreeError> {
        if min_bucket_size < 1 {
            return Err(TreeError::InvalidParameter(
                "The minimum bucket size must be greater than 0.".into(),
            ));
        }
        self.min_bucket_size = min_bucket_size;
        Ok(())
    }

    pub fn set_max_small_bucket_ratio(&mut self, ratio: f64) -> Result<(), TreeError> {
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(TreeError::InvalidParameter(
                "The small bucket ratio must be in (0, 1].".into(),
            ));
        }
        self.max_small_bucket_ratio = ratio;
        Ok(())
    }

    /// Confidence at which the chi-square test must reject independence for
    /// a split to be kept.
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Buckets smaller than this make the chi-square approximation unreliable.
    pub fn min_bucket_size(&self) -> usize {
        self.min_bucket_size
    }

    /// The chi-square test is applied only while the fraction of small
    /// buckets stays below this ratio.
    pub fn max_small_bucket_ratio(&self) -> f64 {
        self.max_small_bucket_ratio
    }
}
