/// One finished PDF, held entirely in memory.
///
/// Produced by a single composition and consumed by a single upload; nothing
/// caches or reuses it across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentArtifact {
    cart_id: i64,
    bytes: Vec<u8>,
}

impl DocumentArtifact {
    pub fn new(cart_id: i64, bytes: Vec<u8>) -> Self {
        Self { cart_id, bytes }
    }

    pub fn cart_id(&self) -> i64 {
        self.cart_id
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
