// vkscript
//
// Copyright (C) 2018 Intel Corporation
// Copyright 2023 Neil Roberts
//
// Permission is hereby granted, free of charge, to any person obtaining a
// copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice (including the next
// paragraph) shall be included in all copies or substantial portions of the
// Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.  IN NO EVENT SHALL
// THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

//! The device features and extensions that a script can require.
//! Features are looked up in a fixed table of the names of the
//! booleans in `VkPhysicalDeviceFeatures` plus the features of a few
//! extension structs. Extensions are split into instance and device
//! extensions.

use thiserror::Error;

// Features from VkPhysicalDeviceFeatures followed by features from
// extension structs, which are named with the struct prefix
static FEATURES: &[&str] = &[
    "robustBufferAccess",
    "fullDrawIndexUint32",
    "imageCubeArray",
    "independentBlend",
    "geometryShader",
    "tessellationShader",
    "sampleRateShading",
    "dualSrcBlend",
    "logicOp",
    "multiDrawIndirect",
    "drawIndirectFirstInstance",
    "depthClamp",
    "depthBiasClamp",
    "fillModeNonSolid",
    "depthBounds",
    "wideLines",
    "largePoints",
    "alphaToOne",
    "multiViewport",
    "samplerAnisotropy",
    "textureCompressionETC2",
    "textureCompressionASTC_LDR",
    "textureCompressionBC",
    "occlusionQueryPrecise",
    "pipelineStatisticsQuery",
    "vertexPipelineStoresAndAtomics",
    "fragmentStoresAndAtomics",
    "shaderTessellationAndGeometryPointSize",
    "shaderImageGatherExtended",
    "shaderStorageImageExtendedFormats",
    "shaderStorageImageMultisample",
    "shaderStorageImageReadWithoutFormat",
    "shaderStorageImageWriteWithoutFormat",
    "shaderUniformBufferArrayDynamicIndexing",
    "shaderSampledImageArrayDynamicIndexing",
    "shaderStorageBufferArrayDynamicIndexing",
    "shaderStorageImageArrayDynamicIndexing",
    "shaderClipDistance",
    "shaderCullDistance",
    "shaderFloat64",
    "shaderInt64",
    "shaderInt16",
    "shaderResourceResidency",
    "shaderResourceMinLod",
    "sparseBinding",
    "sparseResidencyBuffer",
    "sparseResidencyImage2D",
    "sparseResidencyImage3D",
    "sparseResidency2Samples",
    "sparseResidency4Samples",
    "sparseResidency8Samples",
    "sparseResidency16Samples",
    "sparseResidencyAliased",
    "variableMultisampleRate",
    "inheritedQueries",
    "VariablePointerFeatures.variablePointers",
    "VariablePointerFeatures.variablePointersStorageBuffer",
];

// Extensions that are enabled on the instance rather than the device
static INSTANCE_EXTENSIONS: &[&str] = &[
    "VK_EXT_debug_report",
    "VK_EXT_debug_utils",
    "VK_KHR_device_group_creation",
    "VK_KHR_external_fence_capabilities",
    "VK_KHR_external_memory_capabilities",
    "VK_KHR_external_semaphore_capabilities",
    "VK_KHR_get_physical_device_properties2",
    "VK_KHR_get_surface_capabilities2",
    "VK_KHR_surface",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Feature,
    DeviceExtension,
    InstanceExtension,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown feature or extension: {0}")]
pub struct UnknownRequirement(pub String);

/// The ordered lists of requirements. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirements {
    features: Vec<String>,
    device_extensions: Vec<String>,
    instance_extensions: Vec<String>,
}

fn is_extension_name(name: &str) -> bool {
    match name.strip_prefix("VK_") {
        Some(tail) => {
            !tail.is_empty()
                && tail.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        },
        None => false,
    }
}

/// Works out whether the name is a feature or which kind of
/// extension it is. Returns `None` if it is neither a known feature
/// nor a valid extension name.
pub fn classify(name: &str) -> Option<Kind> {
    if FEATURES.contains(&name) {
        Some(Kind::Feature)
    } else if INSTANCE_EXTENSIONS.contains(&name) {
        Some(Kind::InstanceExtension)
    } else if is_extension_name(name) {
        Some(Kind::DeviceExtension)
    } else {
        None
    }
}

impl Requirements {
    pub fn new() -> Requirements {
        Default::default()
    }

    /// Adds a feature or an extension to the matching list
    pub fn add(&mut self, name: &str) -> Result<Kind, UnknownRequirement> {
        let kind = classify(name)
            .ok_or_else(|| UnknownRequirement(name.to_owned()))?;

        let list = match kind {
            Kind::Feature => &mut self.features,
            Kind::DeviceExtension => &mut self.device_extensions,
            Kind::InstanceExtension => &mut self.instance_extensions,
        };

        list.push(name.to_owned());

        Ok(kind)
    }

    #[inline]
    pub fn features(&self) -> &[String] {
        &self.features
    }

    #[inline]
    pub fn device_extensions(&self) -> &[String] {
        &self.device_extensions
    }

    #[inline]
    pub fn instance_extensions(&self) -> &[String] {
        &self.instance_extensions
    }
}
