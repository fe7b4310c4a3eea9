//! Demonstration network used when no input is given

use crate::forest::SocialForest;

/// Five users in one tree and two interactions:
///
/// ```text
/// Alice
///   Bob
///     David
///   Carol
///     Gabriel
/// ```
pub fn sample_forest() -> SocialForest {
    let mut forest = SocialForest::with_capacity(5);
    forest.insert(1, "Alice", None);
    forest.insert(2, "Bob", Some(1));
    forest.insert(3, "Carol", Some(1));
    forest.insert(4, "David", Some(2));
    forest.insert(5, "Gabriel", Some(3));

    forest.record_interaction(1, 2, "Você é um ótimo amigo!");
    forest.record_interaction(2, 3, "Vamos sair para jantar.");

    forest
}
