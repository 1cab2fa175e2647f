use super::app_data;
use super::app_defines;
use super::queue_family;

use anyhow::{Result};
use vulkanalia::prelude::v1_0::*;

pub unsafe fn create_command_pool(instance: &Instance, device: &Device, data: &mut app_data::Data) -> Result<()> {
    let indices = queue_family::QueueFamilyIndices::get(instance, data, data.physical_device)?;

    let info = vk::CommandPoolCreateInfo::builder()
        .queue_family_index(indices.graphics);

    data.command_pool = device.create_command_pool(&info, None)?;

    Ok(())
}

/// Records one command buffer per swapchain image. Recording happens once
/// after swapchain/pipeline creation, not per frame; the buffers are only
/// re-recorded after a swapchain recreation.
pub unsafe fn create_command_buffers(device: &Device, data: &mut app_data::Data, index_count: u32) -> Result<()> {
    let allocate_info = vk::CommandBufferAllocateInfo::builder()
        .command_pool(data.command_pool)
        .level(vk::CommandBufferLevel::PRIMARY)
        .command_buffer_count(data.framebuffers.len() as u32);

    data.command_buffers = device.allocate_command_buffers(&allocate_info)?;

    for (i, command_buffer) in data.command_buffers.iter().enumerate() {
        let begin_info = vk::CommandBufferBeginInfo::builder()
            .flags(vk::CommandBufferUsageFlags::SIMULTANEOUS_USE);

        device.begin_command_buffer(*command_buffer, &begin_info)?;

        let render_area = vk::Rect2D::builder()
            .offset(vk::Offset2D::default())
            .extent(data.swapchain_extent);

        let color_clear_value = vk::ClearValue {
            color: vk::ClearColorValue { float32: app_defines::CLEAR_COLOR },
        };

        let depth_clear_value = vk::ClearValue {
            depth_stencil: vk::ClearDepthStencilValue { depth: 1.0, stencil: 0 },
        };

        let clear_values = &[color_clear_value, depth_clear_value];
        let info = vk::RenderPassBeginInfo::builder()
            .render_pass(data.render_pass)
            .framebuffer(data.framebuffers[i])
            .render_area(render_area)
            .clear_values(clear_values);

        device.cmd_begin_render_pass(*command_buffer, &info, vk::SubpassContents::INLINE);

        device.cmd_bind_pipeline(*command_buffer, vk::PipelineBindPoint::GRAPHICS, data.pipeline);
        device.cmd_bind_vertex_buffers(*command_buffer, 0, &[data.vertex_buffer], &[0]);
        device.cmd_bind_index_buffer(*command_buffer, data.index_buffer, 0, vk::IndexType::UINT16);
        device.cmd_bind_descriptor_sets(
            *command_buffer,
            vk::PipelineBindPoint::GRAPHICS,
            data.pipeline_layout,
            0,
            &[data.descriptor_set],
            &[],
        );
        device.cmd_draw_indexed(*command_buffer, index_count, 1, 0, 0, 0);

        device.cmd_end_render_pass(*command_buffer);

        device.end_command_buffer(*command_buffer)?;
    }

    Ok(())
}

pub unsafe fn begin_single_time_commands(device: &Device, data: &app_data::Data) -> Result<vk::CommandBuffer> {
    let info = vk::CommandBufferAllocateInfo::builder()
        .level(vk::CommandBufferLevel::PRIMARY)
        .command_pool(data.command_pool)
        .command_buffer_count(1);

    let command_buffer = device.allocate_command_buffers(&info)?[0];

    let begin_info = vk::CommandBufferBeginInfo::builder()
        .flags(vk::CommandBufferUsageFlags::ONE_TIME_SUBMIT);

    device.begin_command_buffer(command_buffer, &begin_info)?;

    Ok(command_buffer)
}

/// Submits on the graphics queue and blocks on a fence until the work has
/// finished, so callers may free their staging resources on return.
pub unsafe fn end_single_time_commands(device: &Device, data: &app_data::Data, command_buffer: vk::CommandBuffer) -> Result<()> {
    device.end_command_buffer(command_buffer)?;

    let command_buffers = &[command_buffer];
    let info = vk::SubmitInfo::builder().command_buffers(command_buffers);

    let fence = device.create_fence(&vk::FenceCreateInfo::builder(), None)?;

    device.queue_submit(data.graphics_queue, &[info], fence)?;
    device.wait_for_fences(&[fence], true, u64::max_value())?;

    device.destroy_fence(fence, None);
    device.free_command_buffers(data.command_pool, &[command_buffer]);

    Ok(())
}
