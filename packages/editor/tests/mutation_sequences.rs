//! Tests for longer command sequences
//!
//! This tests:
//! - Order invariant after mixed commands
//! - Undo/redo linearity
//! - History capacity
//! - Column slot restrictions

use mailblock_editor::{
    BlockPatch, Canvas, Command, Document, DragPayload, DropZone, EditorConfig,
};
use mailblock_model::{BlockType, TEMPLATES};

fn assert_orders(doc: &Document) {
    for (index, block) in doc.blocks().iter().enumerate() {
        assert_eq!(block.order, index, "block {} has order {}", block.id, block.order);
        for (slot, child) in block.children.iter().enumerate() {
            assert_eq!(child.order, slot);
        }
    }
}

fn insert(doc: &mut Document, block_type: BlockType, index: usize) -> String {
    let block = doc.instantiate(block_type);
    let id = block.id.clone();
    doc.apply(Command::InsertBlockAt { index, block }).unwrap();
    id
}

#[test]
fn test_order_invariant_over_mixed_commands() {
    let mut doc = Document::new();
    let mut ids = Vec::new();

    for (i, template) in TEMPLATES.iter().enumerate() {
        ids.push(insert(&mut doc, template.block_type, i / 2));
        assert_orders(&doc);
    }

    doc.apply(Command::ReorderBlock {
        block_id: ids[0].clone(),
        new_index: 5,
    })
    .unwrap();
    assert_orders(&doc);

    doc.apply(Command::DuplicateBlock {
        block_id: ids[3].clone(),
    })
    .unwrap();
    assert_orders(&doc);

    doc.apply(Command::DeleteBlock {
        block_id: ids[1].clone(),
    })
    .unwrap();
    assert_orders(&doc);

    doc.apply(Command::ReorderBlock {
        block_id: ids[6].clone(),
        new_index: 0,
    })
    .unwrap();
    assert_orders(&doc);

    assert_eq!(doc.blocks().len(), TEMPLATES.len());

    while doc.undo() {
        assert_orders(&doc);
    }
    assert!(doc.is_empty());
}

#[test]
fn test_undo_then_new_command_discards_redo() {
    let config = EditorConfig::default();

    // [A, B, C], undo twice, then D
    let mut doc = Document::with_config(&config);
    let a = insert(&mut doc, BlockType::Header, 0);
    insert(&mut doc, BlockType::Text, 1);
    doc.apply(Command::UpdateBlock {
        block_id: a.clone(),
        patch: BlockPatch::content("C"),
    })
    .unwrap();

    assert!(doc.undo());
    assert!(doc.undo());
    let d = Command::UpdateBlock {
        block_id: a.clone(),
        patch: BlockPatch::content("D"),
    };
    doc.apply(d.clone()).unwrap();

    assert!(!doc.can_redo());
    assert!(!doc.redo());

    // [A, D]
    let mut expected = Document::with_config(&config);
    let a2 = insert(&mut expected, BlockType::Header, 0);
    assert_eq!(a, a2);
    expected.apply(d).unwrap();

    assert_eq!(doc.snapshot(), expected.snapshot());

    assert!(doc.undo());
    assert_eq!(doc.blocks().len(), 1);
    assert_eq!(doc.blocks()[0].content, "Newsletter Header");
    assert!(doc.undo());
    assert!(doc.is_empty());
    assert!(!doc.undo());
}

#[test]
fn test_history_capacity_bounds_undo() {
    let config = EditorConfig {
        history_capacity: 5,
        ..EditorConfig::default()
    };
    let mut doc = Document::with_config(&config);

    for i in 0..10 {
        insert(&mut doc, BlockType::Spacer, i);
    }

    let mut undos = 0;
    while doc.undo() {
        undos += 1;
    }

    assert_eq!(undos, 4);
    // Oldest reachable state still holds the first five inserts
    assert_eq!(doc.blocks().len(), 6);
}

#[test]
fn test_default_capacity() {
    let mut doc = Document::new();
    for i in 0..60 {
        insert(&mut doc, BlockType::Divider, i);
    }

    let mut undos = 0;
    while doc.undo() {
        undos += 1;
    }
    assert_eq!(undos, 49);
    assert_eq!(doc.blocks().len(), 11);
}

#[test]
fn test_columns_restriction_through_canvas() {
    let mut doc = Document::new();
    let columns = insert(&mut doc, BlockType::Columns, 0);
    let before = doc.block(&columns).unwrap().children.clone();
    let version = doc.version;
    let mut canvas = Canvas::new();

    for template in TEMPLATES.iter() {
        if template.block_type.fits_column_slot() {
            continue;
        }
        for slot in 0..2 {
            canvas.begin_drag(DragPayload::Template(template.block_type));
            let result = canvas
                .drop(
                    &mut doc,
                    DropZone::ColumnSlot {
                        block_id: columns.clone(),
                        slot,
                    },
                )
                .unwrap();
            assert!(result.is_none());
        }
    }

    assert_eq!(doc.block(&columns).unwrap().children, before);
    assert_eq!(doc.version, version);
}

#[test]
fn test_undo_returns_independent_copies() {
    let mut doc = Document::new();
    let id = insert(&mut doc, BlockType::Text, 0);

    let mut taken = doc.snapshot();
    taken[0].content = "mutated outside".to_string();

    doc.apply(Command::UpdateBlock {
        block_id: id.clone(),
        patch: BlockPatch::content("<p>edited</p>"),
    })
    .unwrap();
    doc.undo();

    assert_eq!(
        doc.block(&id).unwrap().content,
        "<p>Start typing your text here...</p>"
    );
}
