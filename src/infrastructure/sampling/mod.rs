// ============================================================
// SAMPLING INFRASTRUCTURE LAYER
// ============================================================
// Seeded, portable draws without replacement

mod seeded_sampler;

pub use seeded_sampler::SeededSampler;
