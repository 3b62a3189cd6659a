//! Growable typed GPU buffer.
//!
//! The instance list is rewritten every frame; the buffer only reallocates
//! when a write exceeds its capacity, doubling to amortize growth.

use std::marker::PhantomData;

/// Minimum allocation in bytes.
const MIN_BYTES: usize = 64;

/// A GPU buffer of `T` that grows on demand and never shrinks.
pub struct TypedBuffer<T> {
    buffer: wgpu::Buffer,
    /// Capacity in bytes.
    capacity: usize,
    count: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: PhantomData<T>,
}

/// Byte capacity after a write of `needed` bytes into a buffer of `current`
/// bytes. Unchanged when the data fits.
fn grown_capacity(current: usize, needed: usize) -> usize {
    if needed <= current {
        current
    } else {
        (needed * 2).max(MIN_BYTES)
    }
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Empty buffer with room for `capacity` items.
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let bytes = (std::mem::size_of::<T>() * capacity).max(MIN_BYTES);
        Self {
            buffer: Self::allocate(device, label, bytes, usage),
            capacity: bytes,
            count: 0,
            usage,
            label: label.to_owned(),
            _marker: PhantomData,
        }
    }

    fn allocate(
        device: &wgpu::Device,
        label: &str,
        bytes: usize,
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: bytes as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Replace the buffer contents, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated.
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let capacity = grown_capacity(self.capacity, bytes.len());
        let reallocated = capacity != self.capacity;
        if reallocated {
            log::debug!("{}: growing to {capacity} bytes", self.label);
            self.buffer = Self::allocate(device, &self.label, capacity, self.usage);
            self.capacity = capacity;
        }
        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.count = data.len();
        reallocated
    }

    /// The underlying GPU buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Number of items last written.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the last write was empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitting_writes_keep_capacity() {
        assert_eq!(grown_capacity(400, 400), 400);
        assert_eq!(grown_capacity(400, 0), 400);
    }

    #[test]
    fn overflowing_writes_double() {
        assert_eq!(grown_capacity(400, 480), 960);
        assert_eq!(grown_capacity(0, 8), MIN_BYTES);
    }
}
