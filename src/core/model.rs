#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Haplotype {
    Mat,
    Pat,
    Unk,
}

impl Haplotype {
    pub const ALL: [Haplotype; 3] = [Haplotype::Mat, Haplotype::Pat, Haplotype::Unk];

    pub fn as_str(self) -> &'static str {
        match self {
            Haplotype::Mat => "mat",
            Haplotype::Pat => "pat",
            Haplotype::Unk => "unk",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Haplotype::Mat => 0,
            Haplotype::Pat => 1,
            Haplotype::Unk => 2,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ReadLength {
    pub length: u64,
    pub tag: Haplotype,
}

/// Ascending minimum-length thresholds; `stop` is exclusive.
#[derive(Clone, Copy, Debug)]
pub struct Sweep {
    pub start: u64,
    pub stop: u64,
    pub step: u64,
}

impl Sweep {
    pub fn thresholds(self) -> impl Iterator<Item = u64> {
        (self.start..self.stop).step_by(self.step as usize)
    }
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            start: 0,
            stop: 150_000,
            step: 2_000,
        }
    }
}
