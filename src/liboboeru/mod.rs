pub(crate) mod codec;
pub(crate) mod deck;
pub(crate) mod kiroku;
pub(crate) mod shitsumon;
pub(crate) mod stats;
