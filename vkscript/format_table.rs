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

// Table of the formats that can be looked up by name. It must be kept
// sorted by name so that it can be binary searched.
static FORMATS: [FormatInfo; 129] = [
    format_info!(
        "A1R5G5B5_UNORM_PACK16",
        Some(16),
        (A, 1, UNORM),
        (R, 5, UNORM),
        (G, 5, UNORM),
        (B, 5, UNORM),
    ),
    format_info!(
        "A2B10G10R10_SINT_PACK32",
        Some(32),
        (A, 2, SINT),
        (B, 10, SINT),
        (G, 10, SINT),
        (R, 10, SINT),
    ),
    format_info!(
        "A2B10G10R10_SNORM_PACK32",
        Some(32),
        (A, 2, SNORM),
        (B, 10, SNORM),
        (G, 10, SNORM),
        (R, 10, SNORM),
    ),
    format_info!(
        "A2B10G10R10_SSCALED_PACK32",
        Some(32),
        (A, 2, SSCALED),
        (B, 10, SSCALED),
        (G, 10, SSCALED),
        (R, 10, SSCALED),
    ),
    format_info!(
        "A2B10G10R10_UINT_PACK32",
        Some(32),
        (A, 2, UINT),
        (B, 10, UINT),
        (G, 10, UINT),
        (R, 10, UINT),
    ),
    format_info!(
        "A2B10G10R10_UNORM_PACK32",
        Some(32),
        (A, 2, UNORM),
        (B, 10, UNORM),
        (G, 10, UNORM),
        (R, 10, UNORM),
    ),
    format_info!(
        "A2B10G10R10_USCALED_PACK32",
        Some(32),
        (A, 2, USCALED),
        (B, 10, USCALED),
        (G, 10, USCALED),
        (R, 10, USCALED),
    ),
    format_info!(
        "A2R10G10B10_SINT_PACK32",
        Some(32),
        (A, 2, SINT),
        (R, 10, SINT),
        (G, 10, SINT),
        (B, 10, SINT),
    ),
    format_info!(
        "A2R10G10B10_SNORM_PACK32",
        Some(32),
        (A, 2, SNORM),
        (R, 10, SNORM),
        (G, 10, SNORM),
        (B, 10, SNORM),
    ),
    format_info!(
        "A2R10G10B10_SSCALED_PACK32",
        Some(32),
        (A, 2, SSCALED),
        (R, 10, SSCALED),
        (G, 10, SSCALED),
        (B, 10, SSCALED),
    ),
    format_info!(
        "A2R10G10B10_UINT_PACK32",
        Some(32),
        (A, 2, UINT),
        (R, 10, UINT),
        (G, 10, UINT),
        (B, 10, UINT),
    ),
    format_info!(
        "A2R10G10B10_UNORM_PACK32",
        Some(32),
        (A, 2, UNORM),
        (R, 10, UNORM),
        (G, 10, UNORM),
        (B, 10, UNORM),
    ),
    format_info!(
        "A2R10G10B10_USCALED_PACK32",
        Some(32),
        (A, 2, USCALED),
        (R, 10, USCALED),
        (G, 10, USCALED),
        (B, 10, USCALED),
    ),
    format_info!(
        "A8B8G8R8_SINT_PACK32",
        Some(32),
        (A, 8, SINT),
        (B, 8, SINT),
        (G, 8, SINT),
        (R, 8, SINT),
    ),
    format_info!(
        "A8B8G8R8_SNORM_PACK32",
        Some(32),
        (A, 8, SNORM),
        (B, 8, SNORM),
        (G, 8, SNORM),
        (R, 8, SNORM),
    ),
    format_info!(
        "A8B8G8R8_SRGB_PACK32",
        Some(32),
        (A, 8, SRGB),
        (B, 8, SRGB),
        (G, 8, SRGB),
        (R, 8, SRGB),
    ),
    format_info!(
        "A8B8G8R8_SSCALED_PACK32",
        Some(32),
        (A, 8, SSCALED),
        (B, 8, SSCALED),
        (G, 8, SSCALED),
        (R, 8, SSCALED),
    ),
    format_info!(
        "A8B8G8R8_UINT_PACK32",
        Some(32),
        (A, 8, UINT),
        (B, 8, UINT),
        (G, 8, UINT),
        (R, 8, UINT),
    ),
    format_info!(
        "A8B8G8R8_UNORM_PACK32",
        Some(32),
        (A, 8, UNORM),
        (B, 8, UNORM),
        (G, 8, UNORM),
        (R, 8, UNORM),
    ),
    format_info!(
        "A8B8G8R8_USCALED_PACK32",
        Some(32),
        (A, 8, USCALED),
        (B, 8, USCALED),
        (G, 8, USCALED),
        (R, 8, USCALED),
    ),
    format_info!(
        "B10G11R11_UFLOAT_PACK32",
        Some(32),
        (B, 10, UFLOAT),
        (G, 11, UFLOAT),
        (R, 11, UFLOAT),
    ),
    format_info!(
        "B4G4R4A4_UNORM_PACK16",
        Some(16),
        (B, 4, UNORM),
        (G, 4, UNORM),
        (R, 4, UNORM),
        (A, 4, UNORM),
    ),
    format_info!(
        "B5G5R5A1_UNORM_PACK16",
        Some(16),
        (B, 5, UNORM),
        (G, 5, UNORM),
        (R, 5, UNORM),
        (A, 1, UNORM),
    ),
    format_info!(
        "B5G6R5_UNORM_PACK16",
        Some(16),
        (B, 5, UNORM),
        (G, 6, UNORM),
        (R, 5, UNORM),
    ),
    format_info!(
        "B8G8R8A8_SINT",
        None,
        (B, 8, SINT),
        (G, 8, SINT),
        (R, 8, SINT),
        (A, 8, SINT),
    ),
    format_info!(
        "B8G8R8A8_SNORM",
        None,
        (B, 8, SNORM),
        (G, 8, SNORM),
        (R, 8, SNORM),
        (A, 8, SNORM),
    ),
    format_info!(
        "B8G8R8A8_SRGB",
        None,
        (B, 8, SRGB),
        (G, 8, SRGB),
        (R, 8, SRGB),
        (A, 8, SRGB),
    ),
    format_info!(
        "B8G8R8A8_SSCALED",
        None,
        (B, 8, SSCALED),
        (G, 8, SSCALED),
        (R, 8, SSCALED),
        (A, 8, SSCALED),
    ),
    format_info!(
        "B8G8R8A8_UINT",
        None,
        (B, 8, UINT),
        (G, 8, UINT),
        (R, 8, UINT),
        (A, 8, UINT),
    ),
    format_info!(
        "B8G8R8A8_UNORM",
        None,
        (B, 8, UNORM),
        (G, 8, UNORM),
        (R, 8, UNORM),
        (A, 8, UNORM),
    ),
    format_info!(
        "B8G8R8A8_USCALED",
        None,
        (B, 8, USCALED),
        (G, 8, USCALED),
        (R, 8, USCALED),
        (A, 8, USCALED),
    ),
    format_info!(
        "B8G8R8_SINT",
        None,
        (B, 8, SINT),
        (G, 8, SINT),
        (R, 8, SINT),
    ),
    format_info!(
        "B8G8R8_SNORM",
        None,
        (B, 8, SNORM),
        (G, 8, SNORM),
        (R, 8, SNORM),
    ),
    format_info!(
        "B8G8R8_SRGB",
        None,
        (B, 8, SRGB),
        (G, 8, SRGB),
        (R, 8, SRGB),
    ),
    format_info!(
        "B8G8R8_SSCALED",
        None,
        (B, 8, SSCALED),
        (G, 8, SSCALED),
        (R, 8, SSCALED),
    ),
    format_info!(
        "B8G8R8_UINT",
        None,
        (B, 8, UINT),
        (G, 8, UINT),
        (R, 8, UINT),
    ),
    format_info!(
        "B8G8R8_UNORM",
        None,
        (B, 8, UNORM),
        (G, 8, UNORM),
        (R, 8, UNORM),
    ),
    format_info!(
        "B8G8R8_USCALED",
        None,
        (B, 8, USCALED),
        (G, 8, USCALED),
        (R, 8, USCALED),
    ),
    format_info!(
        "D16_UNORM",
        None,
        (D, 16, UNORM),
    ),
    format_info!(
        "D16_UNORM_S8_UINT",
        None,
        (D, 16, UNORM),
        (S, 8, UINT),
    ),
    format_info!(
        "D24_UNORM_S8_UINT",
        Some(32),
        (D, 24, UNORM),
        (S, 8, UINT),
    ),
    format_info!(
        "D32_SFLOAT",
        None,
        (D, 32, SFLOAT),
    ),
    format_info!(
        "D32_SFLOAT_S8_UINT",
        None,
        (D, 32, SFLOAT),
        (S, 8, UINT),
    ),
    format_info!(
        "R16G16B16A16_SFLOAT",
        None,
        (R, 16, SFLOAT),
        (G, 16, SFLOAT),
        (B, 16, SFLOAT),
        (A, 16, SFLOAT),
    ),
    format_info!(
        "R16G16B16A16_SINT",
        None,
        (R, 16, SINT),
        (G, 16, SINT),
        (B, 16, SINT),
        (A, 16, SINT),
    ),
    format_info!(
        "R16G16B16A16_SNORM",
        None,
        (R, 16, SNORM),
        (G, 16, SNORM),
        (B, 16, SNORM),
        (A, 16, SNORM),
    ),
    format_info!(
        "R16G16B16A16_SSCALED",
        None,
        (R, 16, SSCALED),
        (G, 16, SSCALED),
        (B, 16, SSCALED),
        (A, 16, SSCALED),
    ),
    format_info!(
        "R16G16B16A16_UINT",
        None,
        (R, 16, UINT),
        (G, 16, UINT),
        (B, 16, UINT),
        (A, 16, UINT),
    ),
    format_info!(
        "R16G16B16A16_UNORM",
        None,
        (R, 16, UNORM),
        (G, 16, UNORM),
        (B, 16, UNORM),
        (A, 16, UNORM),
    ),
    format_info!(
        "R16G16B16A16_USCALED",
        None,
        (R, 16, USCALED),
        (G, 16, USCALED),
        (B, 16, USCALED),
        (A, 16, USCALED),
    ),
    format_info!(
        "R16G16B16_SFLOAT",
        None,
        (R, 16, SFLOAT),
        (G, 16, SFLOAT),
        (B, 16, SFLOAT),
    ),
    format_info!(
        "R16G16B16_SINT",
        None,
        (R, 16, SINT),
        (G, 16, SINT),
        (B, 16, SINT),
    ),
    format_info!(
        "R16G16B16_SNORM",
        None,
        (R, 16, SNORM),
        (G, 16, SNORM),
        (B, 16, SNORM),
    ),
    format_info!(
        "R16G16B16_SSCALED",
        None,
        (R, 16, SSCALED),
        (G, 16, SSCALED),
        (B, 16, SSCALED),
    ),
    format_info!(
        "R16G16B16_UINT",
        None,
        (R, 16, UINT),
        (G, 16, UINT),
        (B, 16, UINT),
    ),
    format_info!(
        "R16G16B16_UNORM",
        None,
        (R, 16, UNORM),
        (G, 16, UNORM),
        (B, 16, UNORM),
    ),
    format_info!(
        "R16G16B16_USCALED",
        None,
        (R, 16, USCALED),
        (G, 16, USCALED),
        (B, 16, USCALED),
    ),
    format_info!(
        "R16G16_SFLOAT",
        None,
        (R, 16, SFLOAT),
        (G, 16, SFLOAT),
    ),
    format_info!(
        "R16G16_SINT",
        None,
        (R, 16, SINT),
        (G, 16, SINT),
    ),
    format_info!(
        "R16G16_SNORM",
        None,
        (R, 16, SNORM),
        (G, 16, SNORM),
    ),
    format_info!(
        "R16G16_SSCALED",
        None,
        (R, 16, SSCALED),
        (G, 16, SSCALED),
    ),
    format_info!(
        "R16G16_UINT",
        None,
        (R, 16, UINT),
        (G, 16, UINT),
    ),
    format_info!(
        "R16G16_UNORM",
        None,
        (R, 16, UNORM),
        (G, 16, UNORM),
    ),
    format_info!(
        "R16G16_USCALED",
        None,
        (R, 16, USCALED),
        (G, 16, USCALED),
    ),
    format_info!(
        "R16_SFLOAT",
        None,
        (R, 16, SFLOAT),
    ),
    format_info!(
        "R16_SINT",
        None,
        (R, 16, SINT),
    ),
    format_info!(
        "R16_SNORM",
        None,
        (R, 16, SNORM),
    ),
    format_info!(
        "R16_SSCALED",
        None,
        (R, 16, SSCALED),
    ),
    format_info!(
        "R16_UINT",
        None,
        (R, 16, UINT),
    ),
    format_info!(
        "R16_UNORM",
        None,
        (R, 16, UNORM),
    ),
    format_info!(
        "R16_USCALED",
        None,
        (R, 16, USCALED),
    ),
    format_info!(
        "R32G32B32A32_SFLOAT",
        None,
        (R, 32, SFLOAT),
        (G, 32, SFLOAT),
        (B, 32, SFLOAT),
        (A, 32, SFLOAT),
    ),
    format_info!(
        "R32G32B32A32_SINT",
        None,
        (R, 32, SINT),
        (G, 32, SINT),
        (B, 32, SINT),
        (A, 32, SINT),
    ),
    format_info!(
        "R32G32B32A32_UINT",
        None,
        (R, 32, UINT),
        (G, 32, UINT),
        (B, 32, UINT),
        (A, 32, UINT),
    ),
    format_info!(
        "R32G32B32_SFLOAT",
        None,
        (R, 32, SFLOAT),
        (G, 32, SFLOAT),
        (B, 32, SFLOAT),
    ),
    format_info!(
        "R32G32B32_SINT",
        None,
        (R, 32, SINT),
        (G, 32, SINT),
        (B, 32, SINT),
    ),
    format_info!(
        "R32G32B32_UINT",
        None,
        (R, 32, UINT),
        (G, 32, UINT),
        (B, 32, UINT),
    ),
    format_info!(
        "R32G32_SFLOAT",
        None,
        (R, 32, SFLOAT),
        (G, 32, SFLOAT),
    ),
    format_info!(
        "R32G32_SINT",
        None,
        (R, 32, SINT),
        (G, 32, SINT),
    ),
    format_info!(
        "R32G32_UINT",
        None,
        (R, 32, UINT),
        (G, 32, UINT),
    ),
    format_info!(
        "R32_SFLOAT",
        None,
        (R, 32, SFLOAT),
    ),
    format_info!(
        "R32_SINT",
        None,
        (R, 32, SINT),
    ),
    format_info!(
        "R32_UINT",
        None,
        (R, 32, UINT),
    ),
    format_info!(
        "R4G4B4A4_UNORM_PACK16",
        Some(16),
        (R, 4, UNORM),
        (G, 4, UNORM),
        (B, 4, UNORM),
        (A, 4, UNORM),
    ),
    format_info!(
        "R4G4_UNORM_PACK8",
        Some(8),
        (R, 4, UNORM),
        (G, 4, UNORM),
    ),
    format_info!(
        "R5G5B5A1_UNORM_PACK16",
        Some(16),
        (R, 5, UNORM),
        (G, 5, UNORM),
        (B, 5, UNORM),
        (A, 1, UNORM),
    ),
    format_info!(
        "R5G6B5_UNORM_PACK16",
        Some(16),
        (R, 5, UNORM),
        (G, 6, UNORM),
        (B, 5, UNORM),
    ),
    format_info!(
        "R64G64B64A64_SFLOAT",
        None,
        (R, 64, SFLOAT),
        (G, 64, SFLOAT),
        (B, 64, SFLOAT),
        (A, 64, SFLOAT),
    ),
    format_info!(
        "R64G64B64A64_SINT",
        None,
        (R, 64, SINT),
        (G, 64, SINT),
        (B, 64, SINT),
        (A, 64, SINT),
    ),
    format_info!(
        "R64G64B64A64_UINT",
        None,
        (R, 64, UINT),
        (G, 64, UINT),
        (B, 64, UINT),
        (A, 64, UINT),
    ),
    format_info!(
        "R64G64B64_SFLOAT",
        None,
        (R, 64, SFLOAT),
        (G, 64, SFLOAT),
        (B, 64, SFLOAT),
    ),
    format_info!(
        "R64G64B64_SINT",
        None,
        (R, 64, SINT),
        (G, 64, SINT),
        (B, 64, SINT),
    ),
    format_info!(
        "R64G64B64_UINT",
        None,
        (R, 64, UINT),
        (G, 64, UINT),
        (B, 64, UINT),
    ),
    format_info!(
        "R64G64_SFLOAT",
        None,
        (R, 64, SFLOAT),
        (G, 64, SFLOAT),
    ),
    format_info!(
        "R64G64_SINT",
        None,
        (R, 64, SINT),
        (G, 64, SINT),
    ),
    format_info!(
        "R64G64_UINT",
        None,
        (R, 64, UINT),
        (G, 64, UINT),
    ),
    format_info!(
        "R64_SFLOAT",
        None,
        (R, 64, SFLOAT),
    ),
    format_info!(
        "R64_SINT",
        None,
        (R, 64, SINT),
    ),
    format_info!(
        "R64_UINT",
        None,
        (R, 64, UINT),
    ),
    format_info!(
        "R8G8B8A8_SINT",
        None,
        (R, 8, SINT),
        (G, 8, SINT),
        (B, 8, SINT),
        (A, 8, SINT),
    ),
    format_info!(
        "R8G8B8A8_SNORM",
        None,
        (R, 8, SNORM),
        (G, 8, SNORM),
        (B, 8, SNORM),
        (A, 8, SNORM),
    ),
    format_info!(
        "R8G8B8A8_SRGB",
        None,
        (R, 8, SRGB),
        (G, 8, SRGB),
        (B, 8, SRGB),
        (A, 8, SRGB),
    ),
    format_info!(
        "R8G8B8A8_SSCALED",
        None,
        (R, 8, SSCALED),
        (G, 8, SSCALED),
        (B, 8, SSCALED),
        (A, 8, SSCALED),
    ),
    format_info!(
        "R8G8B8A8_UINT",
        None,
        (R, 8, UINT),
        (G, 8, UINT),
        (B, 8, UINT),
        (A, 8, UINT),
    ),
    format_info!(
        "R8G8B8A8_UNORM",
        None,
        (R, 8, UNORM),
        (G, 8, UNORM),
        (B, 8, UNORM),
        (A, 8, UNORM),
    ),
    format_info!(
        "R8G8B8A8_USCALED",
        None,
        (R, 8, USCALED),
        (G, 8, USCALED),
        (B, 8, USCALED),
        (A, 8, USCALED),
    ),
    format_info!(
        "R8G8B8_SINT",
        None,
        (R, 8, SINT),
        (G, 8, SINT),
        (B, 8, SINT),
    ),
    format_info!(
        "R8G8B8_SNORM",
        None,
        (R, 8, SNORM),
        (G, 8, SNORM),
        (B, 8, SNORM),
    ),
    format_info!(
        "R8G8B8_SRGB",
        None,
        (R, 8, SRGB),
        (G, 8, SRGB),
        (B, 8, SRGB),
    ),
    format_info!(
        "R8G8B8_SSCALED",
        None,
        (R, 8, SSCALED),
        (G, 8, SSCALED),
        (B, 8, SSCALED),
    ),
    format_info!(
        "R8G8B8_UINT",
        None,
        (R, 8, UINT),
        (G, 8, UINT),
        (B, 8, UINT),
    ),
    format_info!(
        "R8G8B8_UNORM",
        None,
        (R, 8, UNORM),
        (G, 8, UNORM),
        (B, 8, UNORM),
    ),
    format_info!(
        "R8G8B8_USCALED",
        None,
        (R, 8, USCALED),
        (G, 8, USCALED),
        (B, 8, USCALED),
    ),
    format_info!(
        "R8G8_SINT",
        None,
        (R, 8, SINT),
        (G, 8, SINT),
    ),
    format_info!(
        "R8G8_SNORM",
        None,
        (R, 8, SNORM),
        (G, 8, SNORM),
    ),
    format_info!(
        "R8G8_SRGB",
        None,
        (R, 8, SRGB),
        (G, 8, SRGB),
    ),
    format_info!(
        "R8G8_SSCALED",
        None,
        (R, 8, SSCALED),
        (G, 8, SSCALED),
    ),
    format_info!(
        "R8G8_UINT",
        None,
        (R, 8, UINT),
        (G, 8, UINT),
    ),
    format_info!(
        "R8G8_UNORM",
        None,
        (R, 8, UNORM),
        (G, 8, UNORM),
    ),
    format_info!(
        "R8G8_USCALED",
        None,
        (R, 8, USCALED),
        (G, 8, USCALED),
    ),
    format_info!(
        "R8_SINT",
        None,
        (R, 8, SINT),
    ),
    format_info!(
        "R8_SNORM",
        None,
        (R, 8, SNORM),
    ),
    format_info!(
        "R8_SRGB",
        None,
        (R, 8, SRGB),
    ),
    format_info!(
        "R8_SSCALED",
        None,
        (R, 8, SSCALED),
    ),
    format_info!(
        "R8_UINT",
        None,
        (R, 8, UINT),
    ),
    format_info!(
        "R8_UNORM",
        None,
        (R, 8, UNORM),
    ),
    format_info!(
        "R8_USCALED",
        None,
        (R, 8, USCALED),
    ),
    format_info!(
        "S8_UINT",
        None,
        (S, 8, UINT),
    ),
    format_info!(
        "X8_D24_UNORM_PACK32",
        Some(32),
        (X, 8, UNORM),
        (D, 24, UNORM),
    ),
];
