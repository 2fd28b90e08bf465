use letterverse_blocks::{Block, ItemStack};
use letterverse_geom::{Direction, GridPos, Vec3};
use letterverse_world::{Level, Sound, UpdateMode};

use crate::table::RewardTable;

/// Contiguous letter tiles along one direction, in reading order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LetterRun {
    pub word: String,
    pub positions: Vec<GridPos>,
}

impl LetterRun {
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Tile the reward appears at.
    pub fn middle(&self) -> Option<GridPos> {
        self.positions.get(self.positions.len() / 2).copied()
    }

    fn same_tiles(&self, other: &LetterRun) -> bool {
        self.len() == other.len() && self.positions.iter().all(|p| other.positions.contains(p))
    }
}

/// A run that spelled a rewarded word.
#[derive(Clone, Debug, PartialEq)]
pub struct WordMatch {
    pub run: LetterRun,
    pub direction: Direction,
    pub reward: ItemStack,
    pub spawned_at: Vec3,
}

/// Read the run through `pos` along `dir`: back up against `dir` to the first letter,
/// then collect forwards.
pub fn scan_run(level: &Level, pos: GridPos, dir: Direction) -> LetterRun {
    let mut run = LetterRun::default();
    if level.kind_at(pos).letter().is_none() {
        return run;
    }
    let back = dir.opposite();
    let mut start = pos;
    while level.kind_at(start.relative(back, 1)).letter().is_some() {
        start = start.relative(back, 1);
    }
    let mut p = start;
    while let Some(letter) = level.kind_at(p).letter() {
        run.word.push(letter.as_char());
        run.positions.push(p);
        p = p.relative(dir, 1);
    }
    run
}

/// Check every direction through a freshly placed letter and pay out each word found.
///
/// All runs are read before any tile is cleared; a run covering the same tiles as one
/// already paid out (the reverse reading) is skipped.
pub fn on_letter_placed(level: &mut Level, table: &RewardTable, pos: GridPos) -> Vec<WordMatch> {
    if level.kind_at(pos).letter().is_none() {
        return Vec::new();
    }
    let mut hits: Vec<(Direction, LetterRun, ItemStack)> = Vec::new();
    for dir in Direction::ALL {
        let run = scan_run(level, pos, dir);
        if run.len() < 2 {
            continue;
        }
        let Some(reward) = table.get(&run.word) else {
            log::trace!(target: "words", "no reward for '{}' at {}", run.word, pos);
            continue;
        };
        if hits.iter().any(|(_, r, _)| r.same_tiles(&run)) {
            continue;
        }
        hits.push((dir, run, reward.clone()));
    }
    hits.into_iter()
        .filter_map(|(direction, run, reward)| reward_run(level, direction, run, reward))
        .collect()
}

fn reward_run(
    level: &mut Level,
    direction: Direction,
    run: LetterRun,
    reward: ItemStack,
) -> Option<WordMatch> {
    let spawned_at = run.middle()?.center();
    for p in &run.positions {
        level.set_block(*p, Block::AIR, UpdateMode::Notify);
    }
    level.spawn_item(reward.clone(), spawned_at, Vec3::ZERO);
    level.play_sound(Sound::LevelUp, spawned_at, 1.0, 1.0);
    log::info!(
        target: "words",
        "spelled '{}' reading {:?} in {}, rewarded {} x{}",
        run.word,
        direction,
        level.dimension,
        reward.item,
        reward.count
    );
    Some(WordMatch {
        run,
        direction,
        reward,
        spawned_at,
    })
}

/// The reward table plus running totals, as one event subscriber.
#[derive(Debug, Default)]
pub struct WordScanner {
    pub table: RewardTable,
    pub words_spelled: u64,
}

impl WordScanner {
    pub fn new(table: RewardTable) -> Self {
        Self {
            table,
            words_spelled: 0,
        }
    }

    pub fn on_block_placed(&mut self, level: &mut Level, pos: GridPos) -> Vec<WordMatch> {
        let hits = on_letter_placed(level, &self.table, pos);
        self.words_spelled += hits.len() as u64;
        hits
    }
}
