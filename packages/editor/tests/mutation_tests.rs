//! Command semantics against a live document

use mailblock_editor::{BlockPatch, Command, Document, MutationError};
use mailblock_model::{Block, BlockType, StyleKey, Styles};

fn document(types: &[BlockType]) -> (Document, Vec<String>) {
    let mut doc = Document::new();
    for block_type in types {
        let block = doc.instantiate(*block_type);
        let index = doc.blocks().len();
        doc.apply(Command::InsertBlockAt { index, block }).unwrap();
    }
    let ids = doc.blocks().iter().map(|b| b.id.clone()).collect();
    (doc, ids)
}

fn ids_of(doc: &Document) -> Vec<&str> {
    doc.blocks().iter().map(|b| b.id.as_str()).collect()
}

#[test]
fn test_insert_clamps_index() {
    let (mut doc, ids) = document(&[BlockType::Header]);
    let block = doc.instantiate(BlockType::Spacer);
    let new_id = block.id.clone();

    doc.apply(Command::InsertBlockAt { index: 99, block }).unwrap();

    assert_eq!(ids_of(&doc), vec![ids[0].as_str(), new_id.as_str()]);
    assert_eq!(doc.blocks()[1].order, 1);
}

#[test]
fn test_delete_removes_columns_with_children() {
    let (mut doc, ids) = document(&[BlockType::Columns, BlockType::Text]);
    let child_id = doc.blocks()[0].children[0].id.clone();

    doc.apply(Command::DeleteBlock {
        block_id: ids[0].clone(),
    })
    .unwrap();

    assert_eq!(ids_of(&doc), vec![ids[1].as_str()]);
    assert!(doc.block(&child_id).is_none());
    assert_eq!(doc.blocks()[0].order, 0);
}

#[test]
fn test_missing_targets_are_noops() {
    let (mut doc, _) = document(&[BlockType::Text]);
    let before = doc.snapshot();
    let version = doc.version;

    let commands = vec![
        Command::DeleteBlock {
            block_id: "gone".to_string(),
        },
        Command::UpdateBlock {
            block_id: "gone".to_string(),
            patch: BlockPatch::content("x"),
        },
        Command::ReorderBlock {
            block_id: "gone".to_string(),
            new_index: 0,
        },
        Command::DuplicateBlock {
            block_id: "gone".to_string(),
        },
    ];

    for command in commands {
        let result = doc.apply(command).unwrap();
        assert!(!result.changed);
    }
    assert_eq!(doc.snapshot(), before);
    assert_eq!(doc.version, version);
}

#[test]
fn test_update_replaces_only_given_attributes() {
    let (mut doc, ids) = document(&[BlockType::Button]);
    let styles: Styles = [(StyleKey::ButtonText, "Buy".to_string())].into_iter().collect();

    doc.apply(Command::UpdateBlock {
        block_id: ids[0].clone(),
        patch: BlockPatch::styles(styles),
    })
    .unwrap();

    let button = doc.block(&ids[0]).unwrap();
    assert_eq!(button.style(StyleKey::ButtonText), Some("Buy"));
    assert_eq!(button.style(StyleKey::ButtonColor), None);
    assert_eq!(button.resolved_style(StyleKey::ButtonColor), "#2563eb");
    assert_eq!(button.content, "");
}

#[test]
fn test_update_column_child() {
    let (mut doc, ids) = document(&[BlockType::Columns]);
    let right = doc.blocks()[0].children[1].id.clone();

    doc.apply(Command::UpdateBlock {
        block_id: right.clone(),
        patch: BlockPatch::content("<p>Right</p>"),
    })
    .unwrap();

    assert_eq!(doc.block(&right).unwrap().content, "<p>Right</p>");
    assert_eq!(doc.index_of(&ids[0]), Some(0));
}

#[test]
fn test_column_child_cannot_take_children() {
    let (mut doc, _) = document(&[BlockType::Columns]);
    let left = doc.blocks()[0].children[0].id.clone();
    let before = doc.snapshot();

    let err = doc
        .apply(Command::UpdateBlock {
            block_id: left,
            patch: BlockPatch::children(vec![Block::new("z", BlockType::Text)]),
        })
        .unwrap_err();

    assert!(matches!(err, MutationError::InvalidStructure(_)));
    assert_eq!(doc.snapshot(), before);
}

#[test]
fn test_columns_children_must_fit_slots() {
    let (mut doc, ids) = document(&[BlockType::Columns]);

    let err = doc
        .apply(Command::UpdateBlock {
            block_id: ids[0].clone(),
            patch: BlockPatch::children(vec![
                Block::new("l", BlockType::Text),
                Block::new("r", BlockType::Button),
            ]),
        })
        .unwrap_err();
    assert!(matches!(err, MutationError::InvalidStructure(_)));

    let err = doc
        .apply(Command::UpdateBlock {
            block_id: ids[0].clone(),
            patch: BlockPatch::children(vec![Block::new("only", BlockType::Text)]),
        })
        .unwrap_err();
    assert!(matches!(err, MutationError::InvalidStructure(_)));
}

#[test]
fn test_reorder_moves_block() {
    let (mut doc, ids) = document(&[BlockType::Header, BlockType::Text, BlockType::Divider]);

    doc.apply(Command::ReorderBlock {
        block_id: ids[2].clone(),
        new_index: 0,
    })
    .unwrap();

    assert_eq!(ids_of(&doc), vec![ids[2].as_str(), ids[0].as_str(), ids[1].as_str()]);
    let orders: Vec<usize> = doc.blocks().iter().map(|b| b.order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[test]
fn test_duplicate_places_copy_after_original() {
    let (mut doc, ids) = document(&[BlockType::Columns, BlockType::Spacer]);

    doc.apply(Command::DuplicateBlock {
        block_id: ids[0].clone(),
    })
    .unwrap();

    let blocks = doc.blocks();
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].id, ids[0]);
    assert_eq!(blocks[2].id, ids[1]);

    let original = &blocks[0];
    let copy = &blocks[1];
    assert_ne!(copy.id, original.id);
    assert_eq!(copy.block_type, BlockType::Columns);
    assert_eq!(copy.styles, original.styles);
    for (a, b) in original.children.iter().zip(&copy.children) {
        assert_ne!(a.id, b.id);
        assert_eq!(a.content, b.content);
    }
    assert_eq!(doc.undo_description(), Some("Duplicate block"));
}
