use super::app_data;
use super::scene;

use anyhow::{Result};
use vulkanalia::prelude::v1_0::*;
use std::mem::size_of;

pub unsafe fn create_descriptor_set_layout(device: &Device, data: &mut app_data::Data) -> Result<()> {
    let ubo_binding = vk::DescriptorSetLayoutBinding::builder()
        .binding(0)
        .descriptor_type(vk::DescriptorType::UNIFORM_BUFFER)
        .descriptor_count(1)
        .stage_flags(vk::ShaderStageFlags::VERTEX);

    let sampler_binding = vk::DescriptorSetLayoutBinding::builder()
        .binding(1)
        .descriptor_type(vk::DescriptorType::COMBINED_IMAGE_SAMPLER)
        .descriptor_count(1)
        .stage_flags(vk::ShaderStageFlags::FRAGMENT);

    let bindings = &[ubo_binding, sampler_binding];
    let info = vk::DescriptorSetLayoutCreateInfo::builder().bindings(bindings);

    data.descriptor_set_layout = device.create_descriptor_set_layout(&info, None)?;

    Ok(())
}

pub unsafe fn create_descriptor_pool(device: &Device, data: &mut app_data::Data) -> Result<()> {
    let ubo_size = vk::DescriptorPoolSize::builder()
        .type_(vk::DescriptorType::UNIFORM_BUFFER)
        .descriptor_count(1);

    let sampler_size = vk::DescriptorPoolSize::builder()
        .type_(vk::DescriptorType::COMBINED_IMAGE_SAMPLER)
        .descriptor_count(1);

    let pool_sizes = &[ubo_size, sampler_size];
    let info = vk::DescriptorPoolCreateInfo::builder()
        .pool_sizes(pool_sizes)
        .max_sets(1);

    data.descriptor_pool = device.create_descriptor_pool(&info, None)?;

    Ok(())
}

/// One descriptor set for the whole app: a single device-local uniform
/// buffer feeds every frame, so there is nothing to vary per image.
pub unsafe fn create_descriptor_set(device: &Device, data: &mut app_data::Data) -> Result<()> {
    // Allocate

    let layouts = &[data.descriptor_set_layout];
    let info = vk::DescriptorSetAllocateInfo::builder()
        .descriptor_pool(data.descriptor_pool)
        .set_layouts(layouts);

    data.descriptor_set = device.allocate_descriptor_sets(&info)?[0];

    // Update

    let info = vk::DescriptorBufferInfo::builder()
        .buffer(data.uniform_buffer)
        .offset(0)
        .range(size_of::<scene::UniformBufferObject>() as u64);

    let buffer_info = &[info];
    let ubo_write = vk::WriteDescriptorSet::builder()
        .dst_set(data.descriptor_set)
        .dst_binding(0)
        .dst_array_element(0)
        .descriptor_type(vk::DescriptorType::UNIFORM_BUFFER)
        .buffer_info(buffer_info);

    let info = vk::DescriptorImageInfo::builder()
        .image_layout(vk::ImageLayout::SHADER_READ_ONLY_OPTIMAL)
        .image_view(data.texture_image_view)
        .sampler(data.texture_sampler);

    let image_info = &[info];
    let sampler_write = vk::WriteDescriptorSet::builder()
        .dst_set(data.descriptor_set)
        .dst_binding(1)
        .dst_array_element(0)
        .descriptor_type(vk::DescriptorType::COMBINED_IMAGE_SAMPLER)
        .image_info(image_info);

    device.update_descriptor_sets(&[ubo_write, sampler_write], &[] as &[vk::CopyDescriptorSet]);

    Ok(())
}
