use super::app_data;
use super::command_buffer;
use super::scene;

use std::mem::size_of;
use std::ptr::copy_nonoverlapping as memcpy;

use anyhow::{anyhow, Result};
use vulkanalia::prelude::v1_0::*;

/// Creates a buffer and binds freshly allocated memory of the first type
/// satisfying both the requirement bitmask and the requested properties.
pub unsafe fn create_buffer(
    instance: &Instance,
    device: &Device,
    data: &app_data::Data,
    size: vk::DeviceSize,
    usage: vk::BufferUsageFlags,
    properties: vk::MemoryPropertyFlags,
) -> Result<(vk::Buffer, vk::DeviceMemory)> {
    let buffer_info = vk::BufferCreateInfo::builder()
        .size(size)
        .usage(usage)
        .sharing_mode(vk::SharingMode::EXCLUSIVE);

    let buffer = device.create_buffer(&buffer_info, None)?;

    let requirements = device.get_buffer_memory_requirements(buffer);

    let memory_info = vk::MemoryAllocateInfo::builder()
        .allocation_size(requirements.size)
        .memory_type_index(get_memory_type_index(instance, data, properties, requirements)?);

    let buffer_memory = device.allocate_memory(&memory_info, None)?;

    device.bind_buffer_memory(buffer, buffer_memory, 0)?;

    Ok((buffer, buffer_memory))
}

pub unsafe fn get_memory_type_index(
    instance: &Instance,
    data: &app_data::Data,
    properties: vk::MemoryPropertyFlags,
    requirements: vk::MemoryRequirements,
) -> Result<u32> {
    let memory = instance.get_physical_device_memory_properties(data.physical_device);
    (0..memory.memory_type_count)
        .find(|i| {
            let suitable = (requirements.memory_type_bits & (1 << i)) != 0;
            let memory_type = memory.memory_types[*i as usize];
            suitable && memory_type.property_flags.contains(properties)
        })
        .ok_or_else(|| anyhow!("Failed to find suitable memory type."))
}

/// Device-side copy via a one-shot command buffer. Blocks until the copy
/// has completed, so the source may be destroyed or rewritten on return.
pub unsafe fn copy_buffer(
    device: &Device,
    data: &app_data::Data,
    source: vk::Buffer,
    destination: vk::Buffer,
    size: vk::DeviceSize,
) -> Result<()> {
    let command_buffer = command_buffer::begin_single_time_commands(device, data)?;

    let region = vk::BufferCopy::builder().size(size);
    device.cmd_copy_buffer(command_buffer, source, destination, &[region]);

    command_buffer::end_single_time_commands(device, data, command_buffer)?;

    Ok(())
}

/// The single CPU-to-GPU path: write into a host-visible staging buffer,
/// then copy into a device-local buffer with `usage | TRANSFER_DST`.
/// Host-visible device-local memory cannot be assumed portable.
unsafe fn upload_via_staging<T>(
    instance: &Instance,
    device: &Device,
    data: &app_data::Data,
    items: &[T],
    usage: vk::BufferUsageFlags,
) -> Result<(vk::Buffer, vk::DeviceMemory)> {
    let size = (size_of::<T>() * items.len()) as u64;

    let (staging_buffer, staging_buffer_memory) = create_buffer(
        instance,
        device,
        data,
        size,
        vk::BufferUsageFlags::TRANSFER_SRC,
        vk::MemoryPropertyFlags::HOST_COHERENT | vk::MemoryPropertyFlags::HOST_VISIBLE,
    )?;

    let memory = device.map_memory(staging_buffer_memory, 0, size, vk::MemoryMapFlags::empty())?;

    memcpy(items.as_ptr(), memory.cast(), items.len());

    device.unmap_memory(staging_buffer_memory);

    let (buffer, buffer_memory) = create_buffer(
        instance,
        device,
        data,
        size,
        vk::BufferUsageFlags::TRANSFER_DST | usage,
        vk::MemoryPropertyFlags::DEVICE_LOCAL,
    )?;

    copy_buffer(device, data, staging_buffer, buffer, size)?;

    device.destroy_buffer(staging_buffer, None);
    device.free_memory(staging_buffer_memory, None);

    Ok((buffer, buffer_memory))
}

pub unsafe fn create_vertex_buffer(
    instance: &Instance,
    device: &Device,
    data: &mut app_data::Data,
    scene: &scene::Scene,
) -> Result<()> {
    let (buffer, buffer_memory) = upload_via_staging(
        instance,
        device,
        data,
        &scene.vertices,
        vk::BufferUsageFlags::VERTEX_BUFFER,
    )?;

    data.vertex_buffer = buffer;
    data.vertex_buffer_memory = buffer_memory;

    Ok(())
}

pub unsafe fn create_index_buffer(
    instance: &Instance,
    device: &Device,
    data: &mut app_data::Data,
    scene: &scene::Scene,
) -> Result<()> {
    let (buffer, buffer_memory) = upload_via_staging(
        instance,
        device,
        data,
        &scene.indices,
        vk::BufferUsageFlags::INDEX_BUFFER,
    )?;

    data.index_buffer = buffer;
    data.index_buffer_memory = buffer_memory;

    Ok(())
}

/// The uniform staging buffer is persistent because it is rewritten every
/// frame, unlike the transient vertex/index staging buffers.
pub unsafe fn create_uniform_buffers(instance: &Instance, device: &Device, data: &mut app_data::Data) -> Result<()> {
    let size = size_of::<scene::UniformBufferObject>() as u64;

    let (staging_buffer, staging_buffer_memory) = create_buffer(
        instance,
        device,
        data,
        size,
        vk::BufferUsageFlags::TRANSFER_SRC,
        vk::MemoryPropertyFlags::HOST_COHERENT | vk::MemoryPropertyFlags::HOST_VISIBLE,
    )?;

    data.uniform_staging_buffer = staging_buffer;
    data.uniform_staging_buffer_memory = staging_buffer_memory;

    let (buffer, buffer_memory) = create_buffer(
        instance,
        device,
        data,
        size,
        vk::BufferUsageFlags::TRANSFER_DST | vk::BufferUsageFlags::UNIFORM_BUFFER,
        vk::MemoryPropertyFlags::DEVICE_LOCAL,
    )?;

    data.uniform_buffer = buffer;
    data.uniform_buffer_memory = buffer_memory;

    Ok(())
}
