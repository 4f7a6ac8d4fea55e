//! Award potential scoring
//!
//! Maps free campaign text to a bounded probability score plus
//! per-category keyword evidence. Matching is substring containment over
//! case-folded text ("award" matches inside "awarded"); each keyword
//! counts at most once no matter how often it repeats in the text.

use serde::{Deserialize, Serialize};

/// One weighted keyword bucket. Several buckets may report their matches
/// under the same evidence factor (the three award tiers all feed
/// `award_indicators`).
#[derive(Debug, Clone)]
pub struct KeywordCategory {
    /// Evidence factor this bucket reports matches under
    pub factor: &'static str,
    /// Score added per matched keyword
    pub weight: i64,
    pub keywords: &'static [&'static str],
}

/// Immutable scoring table injected into the scorer at construction,
/// so tests can swap in alternate keyword sets.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub base_score: i64,
    pub max_score: i64,
    pub categories: Vec<KeywordCategory>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 45,
            max_score: 95,
            categories: vec![
                KeywordCategory {
                    factor: "award_indicators",
                    weight: 15,
                    keywords: &["grand prix", "gold", "winner", "champion", "best", "outstanding"],
                },
                KeywordCategory {
                    factor: "award_indicators",
                    weight: 10,
                    keywords: &["silver", "bronze", "nominated", "finalist", "recognized"],
                },
                KeywordCategory {
                    factor: "award_indicators",
                    weight: 5,
                    keywords: &["award", "competition", "contest"],
                },
                KeywordCategory {
                    factor: "csr_elements",
                    weight: 8,
                    keywords: &[
                        "csr", "social responsibility", "community", "sustainability",
                        "environment", "social impact", "giving back", "charity",
                    ],
                },
                KeywordCategory {
                    factor: "cultural_elements",
                    weight: 7,
                    keywords: &[
                        "filipino", "pinoy", "pilipinas", "bayanihan", "kapamilya",
                        "malasakit", "pagmamahal", "family", "lola", "lolo", "nanay", "tatay",
                    ],
                },
                KeywordCategory {
                    factor: "innovation_markers",
                    weight: 6,
                    keywords: &[
                        "digital", "ai", "technology", "innovation", "creative",
                        "breakthrough", "first", "revolutionary",
                    ],
                },
                KeywordCategory {
                    factor: "emotional_triggers",
                    weight: 5,
                    keywords: &[
                        "inspiring", "heartwarming", "touching", "emotional",
                        "powerful", "moving", "tear-jerking", "uplifting",
                    ],
                },
            ],
        }
    }
}

/// Confidence label, a pure function of the capped score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Confidence {
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "low-medium")]
    LowMedium,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "very-high")]
    VeryHigh,
}

impl Confidence {
    /// The low-medium band extends down to the scorer's base score: an
    /// all-base result (no keyword evidence) is low-medium, not low.
    pub fn from_score(score: i64) -> Self {
        if score >= 80 {
            Self::VeryHigh
        } else if score >= 70 {
            Self::High
        } else if score >= 60 {
            Self::Medium
        } else if score >= 45 {
            Self::LowMedium
        } else {
            Self::Low
        }
    }

    fn recommendation(&self) -> &'static str {
        match self {
            Self::VeryHigh => "Excellent award potential - strong indicators across multiple categories",
            Self::High => "Strong award potential - consider submitting to major award shows",
            Self::Medium => "Good potential - strengthen cultural or innovation elements",
            Self::LowMedium => "Moderate potential - consider adding more emotional or cultural depth",
            Self::Low => "Limited potential - campaign needs significant enhancement",
        }
    }
}

/// Matched keywords for one evidence factor, insertion order preserved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEvidence {
    pub category: String,
    pub matched: Vec<String>,
}

/// Scoring outcome for one campaign text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    pub award_probability: i64,
    pub confidence: Confidence,
    pub factors: Vec<CategoryEvidence>,
    pub recommendation: String,
    pub suggested_improvements: Vec<String>,
}

impl ScoreResult {
    fn evidence_for(&self, factor: &str) -> Option<&CategoryEvidence> {
        self.factors.iter().find(|f| f.category == factor)
    }

    fn factor_is_empty(&self, factor: &str) -> bool {
        self.evidence_for(factor).map_or(true, |f| f.matched.is_empty())
    }
}

pub struct KeywordScorer {
    config: ScoringConfig,
}

impl KeywordScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score arbitrary campaign text. Pure: same input, same output.
    pub fn score(&self, text: &str) -> ScoreResult {
        let text = text.to_lowercase();

        let mut score = self.config.base_score;
        let mut factors: Vec<CategoryEvidence> = Vec::new();

        for category in &self.config.categories {
            let matches: Vec<String> = category
                .keywords
                .iter()
                .filter(|kw| text.contains(**kw))
                .map(|kw| kw.to_string())
                .collect();

            score += matches.len() as i64 * category.weight;

            // Tiers sharing a factor append into the same evidence list
            if let Some(pos) = factors.iter().position(|f| f.category == category.factor) {
                factors[pos].matched.extend(matches);
            } else {
                factors.push(CategoryEvidence {
                    category: category.factor.to_string(),
                    matched: matches,
                });
            }
        }

        let final_score = score.min(self.config.max_score);
        let confidence = Confidence::from_score(final_score);

        let mut result = ScoreResult {
            award_probability: final_score,
            confidence,
            factors,
            recommendation: confidence.recommendation().to_string(),
            suggested_improvements: Vec::new(),
        };
        result.suggested_improvements = improvement_suggestions(&result);
        result
    }
}

impl Default for KeywordScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

/// Deterministic improvement rules, fixed order, no duplicates
fn improvement_suggestions(result: &ScoreResult) -> Vec<String> {
    let mut suggestions = Vec::new();

    if result.factor_is_empty("cultural_elements") {
        suggestions.push("Add Filipino cultural elements like bayanihan spirit or family values".to_string());
    }
    if result.factor_is_empty("csr_elements") {
        suggestions.push("Consider adding corporate social responsibility or community impact angle".to_string());
    }
    if result.factor_is_empty("emotional_triggers") {
        suggestions.push("Strengthen emotional storytelling with inspiring or heartwarming elements".to_string());
    }
    if result.factor_is_empty("innovation_markers") {
        suggestions.push("Highlight innovative or creative execution methods".to_string());
    }
    if result.award_probability < 60 {
        suggestions.push("Consider partnering with local communities for authentic cultural connection".to_string());
        suggestions.push("Develop measurable social impact metrics to strengthen CSR positioning".to_string());
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_scores_base() {
        let scorer = KeywordScorer::default();
        let result = scorer.score("");
        assert_eq!(result.award_probability, 45);
        assert_eq!(result.confidence, Confidence::LowMedium);
        assert!(result.factors.iter().all(|f| f.matched.is_empty()));
    }

    #[test]
    fn test_all_categories_cap_at_95() {
        let scorer = KeywordScorer::default();
        let result =
            scorer.score("grand prix gold winner bayanihan filipino ai innovation heartwarming");
        assert_eq!(result.award_probability, 95);
        assert_eq!(result.confidence, Confidence::VeryHigh);
        // csr is the only factor without a hit in this text
        for factor in ["award_indicators", "cultural_elements", "innovation_markers", "emotional_triggers"] {
            let evidence = result.factors.iter().find(|f| f.category == factor).unwrap();
            assert!(!evidence.matched.is_empty(), "no evidence for {}", factor);
        }
    }

    #[test]
    fn test_substring_containment_not_tokenized() {
        let scorer = KeywordScorer::default();
        // "award" matches inside "awarded", "gold" inside "golden"
        let result = scorer.score("the campaign was awarded a golden trophy");
        let awards = result.factors.iter().find(|f| f.category == "award_indicators").unwrap();
        assert!(awards.matched.contains(&"award".to_string()));
        assert!(awards.matched.contains(&"gold".to_string()));
    }

    #[test]
    fn test_keyword_counted_once() {
        let scorer = KeywordScorer::default();
        let once = scorer.score("gold");
        let thrice = scorer.score("gold gold gold");
        assert_eq!(once.award_probability, thrice.award_probability);
        assert_eq!(once.award_probability, 45 + 15);
    }

    #[test]
    fn test_case_folding() {
        let scorer = KeywordScorer::default();
        assert_eq!(
            scorer.score("GRAND PRIX Bayanihan").award_probability,
            scorer.score("grand prix bayanihan").award_probability
        );
    }

    #[test]
    fn test_monotone_in_matched_keywords() {
        let scorer = KeywordScorer::default();
        let mut previous = 0;
        // growing prefix of one category's keywords
        for text in ["csr", "csr community", "csr community charity"] {
            let score = scorer.score(text).award_probability;
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn test_confidence_thresholds() {
        assert_eq!(Confidence::from_score(95), Confidence::VeryHigh);
        assert_eq!(Confidence::from_score(80), Confidence::VeryHigh);
        assert_eq!(Confidence::from_score(79), Confidence::High);
        assert_eq!(Confidence::from_score(70), Confidence::High);
        assert_eq!(Confidence::from_score(69), Confidence::Medium);
        assert_eq!(Confidence::from_score(60), Confidence::Medium);
        assert_eq!(Confidence::from_score(59), Confidence::LowMedium);
        // the band reaches down to the base score, so a no-evidence 45 is low-medium
        assert_eq!(Confidence::from_score(50), Confidence::LowMedium);
        assert_eq!(Confidence::from_score(45), Confidence::LowMedium);
        assert_eq!(Confidence::from_score(44), Confidence::Low);
    }

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::Low < Confidence::LowMedium);
        assert!(Confidence::LowMedium < Confidence::Medium);
        assert!(Confidence::Medium < Confidence::High);
        assert!(Confidence::High < Confidence::VeryHigh);
    }

    #[test]
    fn test_suggestions_for_empty_factors() {
        let scorer = KeywordScorer::default();
        let result = scorer.score("");
        // all four factor rules fire plus the two low-score extras, fixed order
        assert_eq!(result.suggested_improvements.len(), 6);
        assert!(result.suggested_improvements[0].contains("Filipino cultural elements"));
        assert!(result.suggested_improvements[4].contains("local communities"));

        let strong = scorer.score(
            "bayanihan csr heartwarming ai gold grand prix winner champion best outstanding",
        );
        assert!(strong.suggested_improvements.is_empty());
    }

    #[test]
    fn test_injected_scoring_table() {
        let config = ScoringConfig {
            base_score: 10,
            max_score: 50,
            categories: vec![KeywordCategory {
                factor: "colors",
                weight: 25,
                keywords: &["red", "blue"],
            }],
        };
        let scorer = KeywordScorer::new(config);
        assert_eq!(scorer.score("none").award_probability, 10);
        assert_eq!(scorer.score("red").award_probability, 35);
        // 10 + 2*25 capped at 50
        assert_eq!(scorer.score("red blue").award_probability, 50);
    }
}
