//! Named registry for the raytracer's GPU buffers.
//!
//! Only three buffers exist: the one-shot voxel storage buffer, the
//! per-frame uniform buffer, and the fullscreen quad vertex buffer. They
//! are registered under static string names at startup, writes are
//! bounds-checked against the recorded allocation size, and the running
//! total feeds the startup log line.
//!
//! Bind groups hold their own references to the underlying buffers, so
//! after setup the registry is only consulted for uniform writes.

use std::collections::HashMap;

use wgpu::{util::DeviceExt, Buffer, Device, Queue};

/// Allocation record for a buffer, used for bounds checks and diagnostics.
#[derive(Debug)]
struct BufferAnalytics {
    /// Size of the buffer's allocation in bytes
    allocated_memory: u64,
}

/// Central registry for the raytracer's GPU buffers.
///
/// Provides creation, lookup, and bounds-checked writes for buffers
/// referenced by name.
pub struct BufferState {
    /// The GPU device
    pub device: Device,
    /// The GPU command queue
    pub queue: Queue,
    /// Map of buffer names to buffer objects
    buffers: HashMap<&'static str, Buffer>,
    /// Allocation records for each buffer
    buffer_analytics: HashMap<&'static str, BufferAnalytics>,
}

impl BufferState {
    /// Creates a new buffer registry.
    ///
    /// # Arguments
    /// * `device` - The GPU device
    /// * `queue` - The GPU command queue
    pub fn new(device: Device, queue: Queue) -> Self {
        Self {
            device,
            queue,
            buffers: HashMap::new(),
            buffer_analytics: HashMap::new(),
        }
    }

    /// Creates a buffer under the given name, initialized with data.
    ///
    /// The allocation size is recorded so later writes can be checked
    /// against it.
    pub fn create_buffer_init(
        &mut self,
        buffer_name: &'static str,
        init_descriptor: wgpu::util::BufferInitDescriptor,
    ) {
        let buffer_analytics = BufferAnalytics {
            allocated_memory: init_descriptor.contents.len() as u64,
        };
        let buffer = self.device.create_buffer_init(&init_descriptor);

        self.buffers.insert(buffer_name, buffer);
        self.buffer_analytics.insert(buffer_name, buffer_analytics);
    }

    /// Writes raw bytes into a named buffer at the given offset.
    ///
    /// # Panics
    /// Panics if the buffer does not exist or if the write would run past
    /// the end of its allocation.
    pub fn write_buffer(&self, buffer_name: &'static str, offset: wgpu::BufferAddress, data: &[u8]) {
        let buffer = self.buffers.get(buffer_name).unwrap();
        let buffer_analytics = self.buffer_analytics.get(buffer_name).unwrap();

        let buffer_size = buffer_analytics.allocated_memory;
        let data_size = data.len() as u64;

        if offset + data_size > buffer_size {
            panic!(
                "Buffer write out of bounds for buffer name '{}'",
                buffer_name
            );
        }

        self.queue.write_buffer(buffer, offset, data);
    }

    /// Gets a reference to a buffer by name.
    ///
    /// # Panics
    /// Panics if the buffer does not exist.
    pub fn get_buffer(&self, buffer_name: &'static str) -> &Buffer {
        self.buffers.get(buffer_name).unwrap()
    }

    /// Gets a binding resource for the entire named buffer.
    ///
    /// # Panics
    /// Panics if the buffer does not exist.
    pub fn get_entire_binding(&self, buffer_name: &'static str) -> wgpu::BindingResource {
        let buffer = self.buffers.get(buffer_name).unwrap();
        buffer.as_entire_binding()
    }

    /// Total allocated memory across all registered buffers, in bytes.
    pub fn get_total_allocated_memory(&self) -> u64 {
        self.buffer_analytics
            .iter()
            .fold(0, |acc, (_, buffer_analytics)| {
                acc + buffer_analytics.allocated_memory
            })
    }
}
