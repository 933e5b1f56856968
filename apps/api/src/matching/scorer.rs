//! Candidate–job match scoring.
//!
//! Pure and synchronous: ranks candidate profiles against a single job using
//! resume keyword overlap, skill overlap and a same-city bonus.
//!
//! score = 0.5 × keyword + 0.4 × skill + 0.1 × city

use serde::Serialize;

use crate::models::job::JobRow;
use crate::models::profile::ProfileRow;
use crate::models::resume::ResumeRow;

pub const KEYWORD_WEIGHT: f64 = 0.5;
pub const SKILL_WEIGHT: f64 = 0.4;
pub const CITY_WEIGHT: f64 = 0.1;

/// Keywords of this many characters or fewer never count as a resume hit.
const MIN_KEYWORD_CHARS: usize = 1;

/// Component scores, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub keyword: f64,
    pub skill: f64,
    pub city: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        (KEYWORD_WEIGHT * self.keyword + SKILL_WEIGHT * self.skill + CITY_WEIGHT * self.city)
            .clamp(0.0, 1.0)
    }
}

/// A candidate profile paired with its resume, if any.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub profile: ProfileRow,
    pub resume: Option<ResumeRow>,
}

#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub profile: ProfileRow,
    pub resume: Option<ResumeRow>,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Job-side inputs, lowercased once and shared across all candidates.
pub struct JobCriteria {
    keywords: Vec<String>,
    skills: Vec<String>,
    city: String,
}

impl JobCriteria {
    pub fn from_job(job: &JobRow) -> Self {
        let job_text = format!(
            "{} {} {}",
            job.title,
            job.description,
            job.skills.join(" ")
        )
        .to_lowercase();

        Self {
            keywords: job_text.split_whitespace().map(str::to_string).collect(),
            skills: job.skills.iter().map(|s| s.to_lowercase()).collect(),
            city: job.city.to_lowercase(),
        }
    }

    /// Share of job keywords found anywhere in the resume text.
    /// Substring containment, so "wire" also hits "wiring".
    pub fn keyword_score(&self, resume_text: &str) -> f64 {
        if resume_text.is_empty() {
            return 0.0;
        }
        let matches = self
            .keywords
            .iter()
            .filter(|k| k.chars().count() > MIN_KEYWORD_CHARS && resume_text.contains(k.as_str()))
            .count();
        matches as f64 / self.keywords.len().max(1) as f64
    }

    /// Share of job skills the candidate lists. Duplicate candidate skills count once.
    pub fn skill_score(&self, candidate_skills: &[String]) -> f64 {
        let mut seen: Vec<String> = Vec::with_capacity(candidate_skills.len());
        for skill in candidate_skills {
            let skill = skill.to_lowercase();
            if self.skills.contains(&skill) && !seen.contains(&skill) {
                seen.push(skill);
            }
        }
        seen.len() as f64 / self.skills.len().max(1) as f64
    }

    pub fn city_score(&self, candidate_city: &str) -> f64 {
        if !self.city.is_empty()
            && !candidate_city.is_empty()
            && candidate_city.to_lowercase() == self.city
        {
            1.0
        } else {
            0.0
        }
    }

    pub fn score(&self, profile: &ProfileRow, resume: Option<&ResumeRow>) -> ScoreBreakdown {
        let resume_text = resume
            .and_then(ResumeRow::parsed_text)
            .unwrap_or_default()
            .to_lowercase();

        ScoreBreakdown {
            keyword: self.keyword_score(&resume_text),
            skill: self.skill_score(&profile.skills),
            city: self.city_score(&profile.city),
        }
    }
}

/// Scores every candidate and orders them by descending score.
/// The sort is stable: equal scores keep their input order.
pub fn rank_candidates(job: &JobRow, candidates: Vec<Candidate>) -> Vec<RankedCandidate> {
    let criteria = JobCriteria::from_job(job);

    let mut ranked: Vec<RankedCandidate> = candidates
        .into_iter()
        .map(|Candidate { profile, resume }| {
            let breakdown = criteria.score(&profile, resume.as_ref());
            RankedCandidate {
                score: breakdown.total(),
                breakdown,
                profile,
                resume,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
