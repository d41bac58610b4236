use super::*;

#[test]
fn first_intersection_reveals() {
    let mut tracker = RevealTracker::new("skills");
    let outcome = tracker.on_intersecting(0, Some("about"));
    assert_eq!(outcome, RevealOutcome { reveal: true, animate_skills: false });
    assert!(tracker.revealed.contains(&0));
}

#[test]
fn reveal_is_one_way_and_idempotent() {
    let mut tracker = RevealTracker::new("skills");
    tracker.on_intersecting(2, Some("about"));
    let again = tracker.on_intersecting(2, Some("about"));
    assert!(!again.reveal);
    assert!(tracker.revealed.contains(&2));
}

#[test]
fn skills_animate_only_once() {
    let mut tracker = RevealTracker::new("skills");
    assert!(tracker.on_intersecting(1, Some("skills")).animate_skills);
    assert!(!tracker.on_intersecting(1, Some("skills")).animate_skills);
    assert!(tracker.skills_animated);
}

#[test]
fn configured_skills_id_is_respected() {
    let mut tracker = RevealTracker::new("abilities");
    assert!(!tracker.on_intersecting(0, Some("skills")).animate_skills);
    assert!(tracker.on_intersecting(1, Some("abilities")).animate_skills);
}

#[test]
fn unnamed_sections_still_reveal() {
    let mut tracker = RevealTracker::new("skills");
    let outcome = tracker.on_intersecting(4, None);
    assert!(outcome.reveal);
    assert!(!outcome.animate_skills);
}
