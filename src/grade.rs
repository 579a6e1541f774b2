/// Letter grade awarded for a finished run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grade {
    SPlus,
    S,
    A,
    B,
    C,
    D,
}

impl Grade {
    pub fn for_score(score: u32) -> Self {
        match score {
            200.. => Grade::SPlus,
            150.. => Grade::S,
            100.. => Grade::A,
            60.. => Grade::B,
            30.. => Grade::C,
            _ => Grade::D,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::SPlus => "S+",
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Grade::SPlus => "Snake master! Flawless play!",
            Grade::S => "Amazing! Pro-level skill!",
            Grade::A => "Great job! You're a real contender!",
            Grade::B => "Nice! A little more practice and you'll be a pro!",
            Grade::C => "Not bad! Keep practising!",
            Grade::D => "Everyone starts here. You'll improve fast!",
        }
    }
}

/// Payload of the game-over banner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOverReport {
    pub score: u32,
    pub grade: Grade,
    pub message: &'static str,
}

impl GameOverReport {
    pub fn new(score: u32) -> Self {
        let grade = Grade::for_score(score);
        Self {
            score,
            grade,
            message: grade.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_boundaries() {
        let cases = [
            (0, "D"),
            (29, "D"),
            (30, "C"),
            (59, "C"),
            (60, "B"),
            (99, "B"),
            (100, "A"),
            (149, "A"),
            (150, "S"),
            (199, "S"),
            (200, "S+"),
            (10_000, "S+"),
        ];
        for (score, label) in cases {
            assert_eq!(Grade::for_score(score).label(), label, "score {score}");
        }
    }

    #[test]
    fn report_carries_grade_message() {
        let report = GameOverReport::new(95);
        assert_eq!(report.grade, Grade::B);
        assert_eq!(report.message, Grade::B.message());
    }
}
