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

use vkscript::{
    BufferType, Config, Format, LoadError, Mode, Operation, Script, Value,
};

fn load(source: &str) -> Script {
    match Script::load(source) {
        Ok(script) => script,
        Err(e) => panic!("{}", e),
    }
}

fn load_error(source: &str) -> String {
    Script::load(source).unwrap_err().to_string()
}

#[test]
fn require_features() {
    for feature in [
        "robustBufferAccess",
        "textureCompressionASTC_LDR",
        "shaderTessellationAndGeometryPointSize",
        "sparseResidency16Samples",
        "inheritedQueries",
        "VariablePointerFeatures.variablePointers",
        "VariablePointerFeatures.variablePointersStorageBuffer",
    ] {
        let script = load(&format!("[require]\n{}\n", feature));
        assert_eq!(script.required_features(), &[feature]);
        assert!(script.required_device_extensions().is_empty());
    }
}

#[test]
fn require_extensions() {
    let script = load(
        "[require]\n\
         VK_KHR_storage_buffer_storage_class\n\
         VK_KHR_variable_pointers\n\
         VK_KHR_get_physical_device_properties2",
    );

    assert_eq!(
        script.required_device_extensions(),
        &["VK_KHR_storage_buffer_storage_class", "VK_KHR_variable_pointers"],
    );
    assert_eq!(
        script.required_instance_extensions(),
        &["VK_KHR_get_physical_device_properties2"],
    );
    assert!(script.required_features().is_empty());
}

#[test]
fn require_framebuffer() {
    let script = load("[require]\nframebuffer R32G32B32A32_SFLOAT");

    assert_eq!(script.buffers().len(), 1);
    assert_eq!(script.buffers()[0].buffer_type(), BufferType::Color);
    assert_eq!(
        script.buffers()[0].format(),
        &Format::lookup_by_name("R32G32B32A32_SFLOAT").unwrap(),
    );
}

#[test]
fn require_depth_stencil() {
    let script = load("[require]\ndepthstencil D24_UNORM_S8_UINT");

    assert_eq!(script.buffers().len(), 2);
    assert_eq!(script.buffers()[1].buffer_type(), BufferType::Depth);
    assert_eq!(
        script.buffers()[1].format().name(),
        Some("D24_UNORM_S8_UINT"),
    );
}

#[test]
fn require_multiple_lines() {
    let script = load(
        "[require]\n\
         # Requirements block stuff.\n\
         depthstencil D24_UNORM_S8_UINT\n\
         sparseResidency4Samples\n\
         framebuffer R32G32B32A32_SFLOAT\n\
         # More comments\n\
         inheritedQueries # line comment\n",
    );

    let buffers = script.buffers();
    assert_eq!(buffers.len(), 2);
    assert_eq!(buffers[0].buffer_type(), BufferType::Color);
    assert_eq!(buffers[0].format().name(), Some("R32G32B32A32_SFLOAT"));
    assert_eq!(buffers[1].buffer_type(), BufferType::Depth);
    assert_eq!(buffers[1].format().name(), Some("D24_UNORM_S8_UINT"));

    assert_eq!(
        script.required_features(),
        &["sparseResidency4Samples", "inheritedQueries"],
    );
}

#[test]
fn indices_block() {
    let script = load("[indices]\n1 2 3");

    let buffers = script.buffers();
    assert_eq!(buffers.len(), 2);
    assert_eq!(buffers[1].buffer_type(), BufferType::Index);
    assert_eq!(buffers[1].element_count(), 3);

    let values = buffers[1].values();
    assert!(values.iter().all(|v| v.is_integer()));
    assert_eq!(values, [1, 2, 3].map(Value::Uint16).to_vec());
}

#[test]
fn indices_block_multiple_lines() {
    let script = load(
        "[indices]\n\
         # comment line\n\
         1 2 3   4 5 6\n\
         # another comment\n\
         7 8 9  10 11 12\n",
    );

    assert_eq!(script.buffers().len(), 2);
    assert_eq!(
        script.index_buffer().unwrap().values(),
        (1..=12).map(Value::Uint16).collect::<Vec<_>>(),
    );
}

#[test]
fn indices_block_errors() {
    assert_eq!(
        load_error("[indices]\n1 a 3"),
        "1: Invalid value in indices block: a",
    );
    assert_eq!(
        load_error("[indices]\n100000000000 3"),
        "1: Value too large in indices block: 100000000000",
    );
}

#[test]
fn vertex_data_empty() {
    let script = load("[vertex data]\n#comment\n");
    assert_eq!(script.buffers().len(), 1);
}

#[test]
fn vertex_data_header_format_string() {
    let script = load("[vertex data]\n0/R32G32_SFLOAT 1/A8B8G8R8_UNORM_PACK32");

    let buffers = script.buffers();
    assert_eq!(buffers.len(), 3);

    assert_eq!(buffers[1].buffer_type(), BufferType::Vertex);
    assert_eq!(buffers[1].location(), Some(0));
    assert_eq!(buffers[1].format().name(), Some("R32G32_SFLOAT"));
    assert_eq!(buffers[1].element_count(), 0);

    assert_eq!(buffers[2].buffer_type(), BufferType::Vertex);
    assert_eq!(buffers[2].location(), Some(1));
    assert_eq!(buffers[2].format().name(), Some("A8B8G8R8_UNORM_PACK32"));
    assert!(buffers[2].bytes().is_empty());
}

#[test]
fn vertex_data_header_glsl_string() {
    let script = load("[vertex data]\n0/float/vec2 1/int/vec3");

    let buffers = script.buffers();
    assert_eq!(buffers.len(), 3);

    let format = buffers[1].format();
    assert_eq!(format, &Format::lookup_by_name("R32G32_SFLOAT").unwrap());
    assert_eq!(format.parts().len(), 2);
    assert!(format.parts().iter().all(|p| p.mode == Mode::SFLOAT));

    let format = buffers[2].format();
    assert_eq!(format, &Format::lookup_by_name("R32G32B32_SINT").unwrap());
    assert_eq!(format.parts().len(), 3);
    assert!(format.parts().iter().all(|p| p.mode == Mode::SINT));
}

#[test]
fn vertex_data_rows() {
    let script = load(
        "[vertex data]\n\
         # Vertex data\n\
         0/R32G32B32_SFLOAT  1/R8G8B8_UNORM\n\
         -1    -1 0.25       255 0 0  # ending comment\n\
         # Another Row\n\
         0.25  -1 0.25       255 0 255\n",
    );

    let buffers = script.buffers();
    assert_eq!(buffers.len(), 3);

    assert_eq!(
        buffers[1].values(),
        [-1.0, -1.0, 0.25, 0.25, -1.0, 0.25].map(Value::Float32).to_vec(),
    );
    assert_eq!(
        buffers[2].values(),
        [255, 0, 0, 255, 0, 255].map(Value::Uint8).to_vec(),
    );
}

#[test]
fn vertex_data_rows_with_hex() {
    let script = load(
        "[vertex data]\n\
         0/A8B8G8R8_UNORM_PACK32\n\
         0xff0000ff\n\
         0xffff0000\n",
    );

    let buffers = script.buffers();
    assert_eq!(buffers.len(), 2);
    assert_eq!(
        buffers[1].values(),
        [0xff0000ff, 0xffff0000].map(Value::Uint32).to_vec(),
    );
    assert_eq!(&buffers[1].bytes()[0..4], &[0xff, 0x00, 0x00, 0xff]);
}

#[test]
fn vertex_data_errors() {
    assert_eq!(
        load_error(
            "[vertex data]\n\
             0/R32G32B32_SFLOAT  1/R8G8B8_UNORM\n\
             -1    -1 0.25       255 0 0\n\
             0.25  -1 0.25       255 0\n",
        ),
        "3: Too few cells in given vertex data row",
    );
    assert_eq!(
        load_error(
            "[vertex data]\n\
             0/R32G32B32_SFLOAT  1/R8G8B8_UNORM\n\
             -1    -1 0.25       255 StringValue 0\n\
             0.25  -1 0.25       255 0 0\n",
        ),
        "2: Invalid vertex data value: StringValue",
    );
    assert_eq!(
        load_error(
            "[vertex data]\n\
             0/R32G32B32_SFLOAT  1/R8G8B8_UNORM\n\
             -1    -1 0.25       0xffff0000\n\
             0.25  -1 0.25       255 0\n",
        ),
        "2: Invalid vertex data value: 0xffff0000",
    );
}

#[test]
fn test_block() {
    let script = load(
        "[test]\n\
         clear color 255 255 255 0\n\
         clear depth 10\n\
         clear stencil 2\n\
         clear",
    );

    let ops = script
        .commands()
        .iter()
        .map(|c| c.op.clone())
        .collect::<Vec<_>>();

    assert_eq!(
        ops,
        &[
            Operation::ClearColor { r: 255.0, g: 255.0, b: 255.0, a: 0.0 },
            Operation::ClearDepth { value: 10.0 },
            Operation::ClearStencil { value: 2 },
            Operation::Clear,
        ],
    );
}

#[test]
fn error_line_number_after_shader() {
    let error = Script::load(
        "[compute shader]\n\
         #version 430\n\
         \n\
         void main() {\n\
         }\n\
         \n\
         [test]\n\
         # Error must report line 9\n\
         unknown\n\
         }",
    )
    .unwrap_err();

    assert_eq!(error.to_string(), "9: Unknown command: unknown");
    assert!(matches!(error, LoadError::Invalid { line_num: 9, .. }));
}

#[test]
fn buffers_through_config() {
    let mut config = Config::new();
    config.add_token_replacement("BINDING".to_owned(), "3:1".to_owned());
    config.set_framebuffer_size(64, 16);

    let script = Script::load_with_config(
        "[require]\n\
         depthstencil D32_SFLOAT\n\
         [test]\n\
         ssbo BINDING subdata vec2 8 0.5 0.25\n\
         ssbo BINDING 32\n",
        &config,
    )
    .unwrap();

    let depth = script.depth_buffer().unwrap();
    assert_eq!((depth.width(), depth.height()), (64, 16));

    let ssbo = &script.buffers()[2];
    assert_eq!(ssbo.buffer_type(), BufferType::Storage);
    assert_eq!(ssbo.binding(), Some((3, 1)));
    assert_eq!(ssbo.size_in_bytes(), 32);
    assert_eq!(ssbo.values()[2..4], [Value::Float32(0.5), Value::Float32(0.25)]);

    let mut other = ssbo.clone();
    assert!(ssbo.is_equal(&other).is_ok());
    assert!(ssbo.compare_rmse(&other, 0.0).is_ok());

    let mut changed = ssbo.clone();
    changed.set_data_with_offset(&[Value::Float32(1.0)], 0).unwrap();
    assert!(ssbo.is_equal(&changed).is_err());
    // One of the eight components differs by 1
    assert!(ssbo.compare_rmse(&changed, 0.3).is_err());
    assert!(ssbo.compare_rmse(&changed, 0.4).is_ok());

    changed.copy_to(&mut other).unwrap();
    assert!(changed.is_equal(&other).is_ok());
}
