// Engine modules: asset access and physics

pub mod assets;
pub mod physics;
