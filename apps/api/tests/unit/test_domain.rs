use recipe_api::{
    application::auth::gate::bearer_token,
    domain::{
        like::rules::{self, LikeAction},
        recipe::entity::{Ingredients, NewRecipe, Recipe},
        shared::{errors::DomainError, pagination::PaginationRequest},
        user::entity::User,
    },
    infrastructure::seed::sample_recipes,
};

fn recipe() -> Recipe {
    Recipe::new(NewRecipe {
        title: "Pho".into(),
        ..Default::default()
    })
}

fn user(email: &str) -> User {
    User::with_password(email.into(), "hash".into())
}

#[test]
fn like_unlike_scenario_keeps_both_sides_in_step() {
    let mut pho = recipe();
    let mut alice = user("alice@example.com");
    let mut bob = user("bob@example.com");

    assert_eq!(LikeAction::Like.apply(&mut pho, &mut alice), Ok(1));
    assert_eq!(pho.liked_by, vec![alice.id]);
    assert_eq!(LikeAction::Like.apply(&mut pho, &mut bob), Ok(2));
    assert_eq!(LikeAction::Unlike.apply(&mut pho, &mut alice), Ok(1));
    assert_eq!(pho.liked_by, vec![bob.id]);
    assert_eq!(LikeAction::Unlike.apply(&mut pho, &mut alice), Ok(1));

    assert!(alice.liked_recipes.is_empty());
    assert_eq!(bob.liked_recipes, vec![pho.id]);
}

#[test]
fn duplicate_like_changes_nothing() {
    let mut pho = recipe();
    let mut alice = user("alice@example.com");
    rules::like(&mut pho, &mut alice).unwrap();
    let snapshot = (pho.clone(), alice.clone());

    assert_eq!(rules::like(&mut pho, &mut alice), Err(DomainError::AlreadyLiked));
    assert_eq!((pho, alice), snapshot);
}

#[test]
fn counter_never_goes_negative() {
    let mut pho = recipe();
    let mut alice = user("alice@example.com");
    alice.liked_recipes.push(pho.id);

    assert_eq!(rules::unlike(&mut pho, &mut alice), 0);
    assert!(alice.liked_recipes.is_empty());
}

#[test]
fn reconcile_counter_trusts_liked_by() {
    let mut pho = recipe();
    let alice = user("alice@example.com");
    pho.liked_by = vec![alice.id, alice.id];
    pho.likes = 5;

    assert_eq!(rules::reconcile_counter(&mut pho), 5);
    assert_eq!(pho.likes, 1);
    assert_eq!(pho.liked_by, vec![alice.id]);
}

#[test]
fn bearer_header_parsing() {
    assert_eq!(bearer_token(Some("Bearer abc.def")), Ok("abc.def"));
    assert_eq!(bearer_token(Some("bearer abc")), Ok("abc"));
    assert_eq!(bearer_token(None), Err(DomainError::NoCredential));
    assert!(matches!(
        bearer_token(Some("Token abc")),
        Err(DomainError::InvalidCredential(_))
    ));
}

#[test]
fn pagination_defaults_are_safe_and_stable() {
    let p = PaginationRequest::default();
    assert_eq!(p.limit, 50);
    assert_eq!(p.offset, 0);
}

#[test]
fn sample_recipes_are_complete() {
    let samples = sample_recipes();
    assert_eq!(samples.len(), 16);
    for sample in &samples {
        assert!(!sample.title.is_empty());
        assert!(sample.ethnicity.is_some());
        assert!(matches!(&sample.ingredients, Ingredients::List(items) if !items.is_empty()));
    }
}
