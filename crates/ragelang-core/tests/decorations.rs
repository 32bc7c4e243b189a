use pretty_assertions::assert_eq;
use ragelang_core::{DecorationAnchor, DecorationStore, DocumentId, GhostComment};

#[test]
fn test_remove_exact_matches_anchor_and_text() {
    let doc = DocumentId::new("file:///a.rs");
    let mut store = DecorationStore::new();
    let first = GhostComment::new(DecorationAnchor::new(2, 10), "// 🔥 one");
    let second = GhostComment::new(DecorationAnchor::new(2, 10), "// 🔥 two");
    store.add(&doc, first.clone());
    store.add(&doc, second.clone());

    let moved = GhostComment::new(DecorationAnchor::new(3, 10), "// 🔥 one");
    assert!(!store.remove_exact(&doc, &moved));
    assert!(store.remove_exact(&doc, &first));
    assert_eq!(store.for_document(&doc), std::slice::from_ref(&second));
    assert!(!store.remove_exact(&doc, &first));
}

#[test]
fn test_identical_comments_are_removed_one_at_a_time() {
    let doc = DocumentId::new("file:///a.rs");
    let mut store = DecorationStore::new();
    let comment = GhostComment::new(DecorationAnchor::new(0, 0), "// same");
    store.add(&doc, comment.clone());
    store.add(&doc, comment.clone());

    assert!(store.remove_exact(&doc, &comment));
    assert_eq!(store.len(), 1);
    assert!(store.remove_exact(&doc, &comment));
    assert!(store.is_empty());
}

#[test]
fn test_documents_are_independent() {
    let a = DocumentId::new("file:///a.rs");
    let b = DocumentId::new("file:///b.rs");
    let mut store = DecorationStore::new();
    store.add(&a, GhostComment::new(DecorationAnchor::new(1, 4), "// a"));
    store.add(&b, GhostComment::new(DecorationAnchor::new(1, 4), "// b"));

    let removed = store.clear_document(&a);
    assert_eq!(removed.len(), 1);
    assert!(store.for_document(&a).is_empty());
    assert_eq!(store.for_document(&b).len(), 1);
    assert_eq!(store.documents().collect::<Vec<_>>(), vec![&b]);
}
