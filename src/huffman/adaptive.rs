//! Adaptive Huffman coding in the style of Faller, Gallager and Knuth.
//!
//! Encoder and decoder grow the same code tree one symbol at a time, so
//! no table ever crosses the wire. A distinguished zero-weight leaf, the
//! not-yet-transmitted node, stands for every symbol the tree has not
//! seen; its path followed by a 7-bit fixed code introduces a new symbol.
//!
//! The tree lives in an arena of nodes addressed by index. Swapping two
//! nodes exchanges their order numbers and parent links while both
//! subtrees stay in place, so the parent-child cycles of the tree never
//! turn into ownership cycles.

use crate::alphabet::{self, Symbol, FIXED_CODE_SIZE};
use crate::error::{Error, Result, UnitResult};
use crate::io::{BitReader, BitWriter};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::io::{Read, Write};

const CHUNK_BYTES: usize = 4096;

/// Handle of a node in the tree arena.
type NodeId = usize;

/// Order numbers run from 1 at the bottom to `2 * SYMBOL_COUNT - 1`
/// at the root, which always keeps the largest one.
const MAX_ORDER: u32 = 2 * alphabet::SYMBOL_COUNT as u32 - 1;


#[derive(Debug)]
struct Node {
    symbol: Option<Symbol>,
    weight: u64,
    order: u32,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// The code tree shared by encoder and decoder.
///
/// The sibling property holds after every recorded symbol: listing all
/// nodes by non-decreasing `(weight, order)` puts every parent after
/// both of its children. The weight classes are the machinery for that:
/// for each weight, the non-root nodes of that weight, ascending by order.
#[derive(Debug)]
pub(crate) struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
    nyt: NodeId,
    /// alphabet position to leaf handle
    leaves: [Option<NodeId>; alphabet::SYMBOL_COUNT],
    classes: HashMap<u64, SmallVec<[NodeId; 4]>>,
    next_order: u32,
}

impl Tree {

    pub fn new() -> Self {
        Tree {
            nodes: vec![Node {
                symbol: None,
                weight: 0,
                order: MAX_ORDER,
                parent: None,
                left: None,
                right: None,
            }],
            root: 0,
            nyt: 0,
            leaves: [None; alphabet::SYMBOL_COUNT],
            classes: HashMap::new(),
            next_order: MAX_ORDER,
        }
    }

    pub fn reset(&mut self) {
        *self = Tree::new();
    }

    fn leaf_of(&self, symbol: Symbol) -> Option<NodeId> {
        self.leaves[symbol.index()]
    }

    /// The path from the root down to `node`: left is `0`, right is `1`.
    fn path_to(&self, node: NodeId) -> SmallVec<[bool; 64]> {
        let mut path = SmallVec::new();
        let mut current = node;

        while let Some(parent) = self.nodes[current].parent {
            path.push(self.nodes[parent].right == Some(current));
            current = parent;
        }

        path.reverse();
        path
    }

    /// Split the not-yet-transmitted leaf into a branch carrying a fresh
    /// such leaf on the left and the new symbol's leaf on the right.
    /// Returns the branch, which is the node that was the old leaf.
    fn create_node(&mut self, symbol: Symbol) -> NodeId {
        let branch = self.nyt;

        let leaf = self.nodes.len();
        self.nodes.push(Node {
            symbol: Some(symbol),
            weight: 1,
            order: self.next_order - 1,
            parent: Some(branch),
            left: None,
            right: None,
        });

        let nyt = self.nodes.len();
        self.nodes.push(Node {
            symbol: None,
            weight: 0,
            order: self.next_order - 2,
            parent: Some(branch),
            left: None,
            right: None,
        });

        self.next_order -= 2;
        self.nyt = nyt;
        self.leaves[symbol.index()] = Some(leaf);

        let branch_node = &mut self.nodes[branch];
        branch_node.left = Some(nyt);
        branch_node.right = Some(leaf);
        branch_node.weight = 1;

        // the new nodes hold the smallest orders of weight class one,
        // so prepending keeps the class sorted
        let root = self.root;
        let class = self.classes.entry(1).or_default();
        if branch != root {
            class.insert(0, branch);
        }
        class.insert(0, leaf);

        branch
    }

    /// Record one occurrence of `symbol`: grow the tree on first sight,
    /// then rebalance and reweigh the path up to the root.
    pub fn record(&mut self, symbol: Symbol) {
        match self.leaf_of(symbol) {
            Some(leaf) => self.update(leaf),

            None => {
                let branch = self.create_node(symbol);
                if branch == self.root {
                    // the very first symbol; its weight already counts it
                    return;
                }

                let parent = self.nodes[branch].parent;
                self.pre_promote(branch);

                if let Some(parent) = parent {
                    self.update(parent);
                }
            },
        }
    }

    /// Walk from `node` to the root, at every level swapping the node
    /// with its weight-class leader where the ordering demands it and
    /// then moving the node one class up. The root's weight comes last.
    fn update(&mut self, mut node: NodeId) {
        while node != self.root {
            self.promote(node);

            match self.nodes[node].parent {
                Some(parent) => node = parent,
                None => break, // unreachable, non-root nodes have parents
            }
        }

        self.nodes[self.root].weight += 1;
    }

    /// One swap-then-increment step of the update walk.
    fn promote(&mut self, node: NodeId) {
        self.leader_swap(node);
        self.increment_weight(node);
    }

    /// A freshly created branch enters weight class one below nodes of
    /// higher order; one leader swap of the branch restores the class
    /// ordering. Unlike [`Tree::promote`], the branch keeps its weight.
    fn pre_promote(&mut self, branch: NodeId) {
        self.leader_swap(branch);
    }

    /// Swap `node` with the leader of its weight class, unless the
    /// leader is the node itself or its parent. The two entries trade
    /// places inside the class list, which keeps it sorted by order.
    fn leader_swap(&mut self, node: NodeId) {
        let weight = self.nodes[node].weight;

        if let Some(leader) = self.class_leader(weight) {
            if leader != node && Some(leader) != self.nodes[node].parent {
                self.relocate(node, leader);
                self.swap_class_positions(weight, node, leader);
            }
        }
    }

    /// Swap two non-root nodes: exchange order numbers and parent links,
    /// leaving both subtrees intact.
    fn relocate(&mut self, first: NodeId, second: NodeId) {
        let first_order = self.nodes[first].order;
        let second_order = self.nodes[second].order;
        self.nodes[first].order = second_order;
        self.nodes[second].order = first_order;

        match (self.nodes[first].parent, self.nodes[second].parent) {
            (Some(shared), Some(second_parent)) if shared == second_parent => {
                let parent = &mut self.nodes[shared];
                std::mem::swap(&mut parent.left, &mut parent.right);
            },

            (Some(first_parent), Some(second_parent)) => {
                self.nodes[first].parent = Some(second_parent);
                self.nodes[second].parent = Some(first_parent);
                self.replace_child(first_parent, first, second);
                self.replace_child(second_parent, second, first);
            },

            _ => debug_assert!(false, "swap involving the root"),
        }
    }

    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        let parent = &mut self.nodes[parent];

        if parent.left == Some(old) { parent.left = Some(new); }
        else { parent.right = Some(new); }
    }

    /// The class member with the highest order.
    fn class_leader(&self, weight: u64) -> Option<NodeId> {
        self.classes.get(&weight).and_then(|class| class.last().copied())
    }

    /// Move `node` one weight class up, keeping both classes sorted by order.
    fn increment_weight(&mut self, node: NodeId) {
        let weight = self.nodes[node].weight;

        if let Some(class) = self.classes.get_mut(&weight) {
            if let Some(position) = class.iter().position(|&member| member == node) {
                class.remove(position);
            }
        }

        let weight = weight + 1;
        self.nodes[node].weight = weight;
        let order = self.nodes[node].order;

        let nodes = &self.nodes;
        let class = self.classes.entry(weight).or_default();
        let position = class.partition_point(|&member| nodes[member].order < order);
        class.insert(position, node);
    }

    fn swap_class_positions(&mut self, weight: u64, first: NodeId, second: NodeId) {
        if let Some(class) = self.classes.get_mut(&weight) {
            let first_position = class.iter().position(|&member| member == first);
            let second_position = class.iter().position(|&member| member == second);

            if let (Some(first_position), Some(second_position)) = (first_position, second_position) {
                class.swap(first_position, second_position);
            }
        }
    }
}


/// The encoding state machine: the tree, fed one symbol at a time.
#[derive(Debug)]
pub struct Encoder {
    tree: Tree,
}

impl Encoder {

    pub fn new() -> Self {
        Encoder { tree: Tree::new() }
    }

    /// Emit the bits for one symbol and record it in the tree.
    /// A symbol the tree knows emits its code path; an unseen symbol
    /// emits the path to the not-yet-transmitted leaf and its fixed code.
    pub fn encode(&mut self, symbol: Symbol, output: &mut BitWriter<impl Write>) -> UnitResult {
        match self.tree.leaf_of(symbol) {
            Some(leaf) => {
                for bit in self.tree.path_to(leaf) {
                    output.write_bit(bit)?;
                }
            },

            None => {
                for bit in self.tree.path_to(self.tree.nyt) {
                    output.write_bit(bit)?;
                }

                output.write_bits(symbol.fixed_code(), FIXED_CODE_SIZE)?;
            },
        }

        self.tree.record(symbol);
        Ok(())
    }

    /// Encode the end marker and pad the sink to a byte boundary.
    pub fn finish(mut self, output: &mut BitWriter<impl Write>) -> UnitResult {
        self.encode(Symbol::EOF, output)?;
        output.flush()
    }

    /// Forget everything and return to the initial state.
    pub fn reset(&mut self) {
        self.tree.reset();
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}


/// The decoding state machine, mirroring the encoder's tree updates exactly.
#[derive(Debug)]
pub struct Decoder {
    tree: Tree,
    started: bool,
}

impl Decoder {

    pub fn new() -> Self {
        Decoder {
            tree: Tree::new(),
            started: false,
        }
    }

    /// Read the next symbol, or `None` once the end marker appears.
    /// Before anything was decoded, an entirely empty input also
    /// yields `None`, decoding to empty text.
    pub fn decode(&mut self, input: &mut BitReader<impl Read>) -> Result<Option<Symbol>> {
        let symbol = if self.started {
            self.walk(input)?
        }
        else {
            // the first symbol arrives as a bare fixed code
            self.started = true;
            match read_fixed_code(input)? {
                None => return Ok(None),
                Some(symbol) => symbol,
            }
        };

        if symbol == Symbol::EOF {
            return Ok(None);
        }

        self.tree.record(symbol);
        Ok(Some(symbol))
    }

    /// Follow payload bits down from the root until a leaf speaks.
    fn walk(&mut self, input: &mut BitReader<impl Read>) -> Result<Symbol> {
        let mut node = self.tree.root;

        loop {
            let bit = input.read_bit()?
                .ok_or_else(|| Error::encoding("bit stream ended before the end marker"))?;

            let next = if bit { self.tree.nodes[node].right } else { self.tree.nodes[node].left };
            node = next.ok_or_else(|| Error::encoding("code path leads outside the tree"))?;

            if node == self.tree.nyt {
                return read_fixed_code(input)?
                    .ok_or_else(|| Error::encoding("bit stream ended before the end marker"));
            }

            if let Some(symbol) = self.tree.nodes[node].symbol {
                return Ok(symbol);
            }
        }
    }

    /// Forget everything and return to the initial state.
    pub fn reset(&mut self) {
        self.tree.reset();
        self.started = false;
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

fn read_fixed_code(input: &mut BitReader<impl Read>) -> Result<Option<Symbol>> {
    match input.read_bits(FIXED_CODE_SIZE)? {
        None => Ok(None),

        Some(code) => Symbol::from_fixed_code(code)
            .ok_or_else(|| Error::encoding("fixed code names no alphabet symbol"))
            .map(Some),
    }
}


/// Read text from `input` until it is exhausted and write the complete
/// encoding to `output`, zero-padded to a byte boundary.
pub fn dump(mut input: impl Read, output: impl Write) -> UnitResult {
    let mut output = BitWriter::new(output);
    let mut encoder = Encoder::new();

    let mut chunk = [0_u8; CHUNK_BYTES];
    loop {
        let bytes_read = input.read(&mut chunk)?;
        if bytes_read == 0 {
            break;
        }

        for &byte in &chunk[.. bytes_read] {
            encoder.encode(Symbol::from_byte(byte)?, &mut output)?;
        }
    }

    encoder.finish(&mut output)
}

/// Decode symbols from `input` and write them to `output` until the
/// end marker appears. An empty input yields empty output.
pub fn load(input: impl Read, mut output: impl Write) -> UnitResult {
    let mut input = BitReader::new(input);
    let mut decoder = Decoder::new();

    let mut decoded = Vec::with_capacity(CHUNK_BYTES);
    while let Some(symbol) = decoder.decode(&mut input)? {
        decoded.push(symbol.to_byte());

        if decoded.len() == CHUNK_BYTES {
            output.write_all(&decoded)?;
            decoded.clear();
        }
    }

    output.write_all(&decoded)?;
    output.flush()?;
    Ok(())
}
