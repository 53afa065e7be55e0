use imtensor_base::{Tensor, TensorError};

#[test]
fn test_tensor_new_valid() {
    let tensor = Tensor::new(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    assert_eq!(tensor.shape, vec![2, 3]);
    assert_eq!(tensor.data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_tensor_new_shape_mismatch() {
    let result = Tensor::new(vec![1, 3, 2, 2], vec![0.0f32; 11]);
    assert_eq!(
        result.unwrap_err(),
        TensorError::ShapeMismatch {
            expected: 12,
            got: 11
        }
    );
}

#[test]
fn test_tensor_new_overflow() {
    let result = Tensor::<f32>::new(vec![usize::MAX, 2], vec![]);
    assert!(matches!(result, Err(TensorError::ShapeOverflow)));
}

#[test]
fn test_tensor_zeros() {
    let tensor = Tensor::<f32>::zeros(vec![1, 3, 2, 2]).unwrap();
    assert_eq!(tensor.shape, vec![1, 3, 2, 2]);
    assert_eq!(tensor.data, vec![0.0; 12]);
    assert_eq!(tensor.ndim(), 4);
    assert_eq!(tensor.len(), 12);
}

#[test]
fn test_tensor_is_empty() {
    let empty = Tensor::<f32>::new(vec![0], vec![]).unwrap();
    assert!(empty.is_empty());

    let not_empty = Tensor::new(vec![2], vec![1.0, 2.0]).unwrap();
    assert!(!not_empty.is_empty());
}

#[test]
fn test_tensor_offset_row_major() {
    let tensor = Tensor::<u8>::zeros(vec![1, 3, 4, 5]).unwrap();
    assert_eq!(tensor.offset(&[0, 0, 0, 0]), Some(0));
    assert_eq!(tensor.offset(&[0, 0, 0, 1]), Some(1));
    assert_eq!(tensor.offset(&[0, 0, 1, 0]), Some(5));
    assert_eq!(tensor.offset(&[0, 1, 0, 0]), Some(20));
    assert_eq!(tensor.offset(&[0, 2, 3, 4]), Some(59));
}

#[test]
fn test_tensor_offset_rejects_bad_index() {
    let tensor = Tensor::<u8>::zeros(vec![2, 3]).unwrap();
    assert_eq!(tensor.offset(&[2, 0]), None);
    assert_eq!(tensor.offset(&[0, 3]), None);
    assert_eq!(tensor.offset(&[0]), None);
    assert_eq!(tensor.offset(&[0, 0, 0]), None);
}

#[test]
fn test_tensor_get() {
    let tensor = Tensor::new(vec![2, 2], vec![1, 2, 3, 4]).unwrap();
    assert_eq!(tensor.get(&[1, 0]), Some(&3));
    assert_eq!(tensor.get(&[1, 2]), None);
}

#[test]
fn test_tensor_debug_omits_data() {
    let tensor = Tensor::new(vec![2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let debug_str = format!("{:?}", tensor);
    assert!(debug_str.contains("Tensor"));
    assert!(debug_str.contains("shape"));
    assert!(debug_str.contains("len: 4"));
}

#[test]
fn test_tensor_error_display() {
    assert_eq!(
        TensorError::ShapeMismatch { expected: 12, got: 6 }.to_string(),
        "shape mismatch: expected 12 elements, got 6"
    );
    assert!(TensorError::ShapeOverflow.to_string().contains("overflow"));
}

#[cfg(feature = "ndarray")]
#[test]
fn test_tensor_into_ndarray() {
    let tensor = Tensor::new(vec![1, 2, 3], (0..6).collect::<Vec<i32>>()).unwrap();
    let array = tensor.into_ndarray().unwrap();
    assert_eq!(array.shape(), &[1, 2, 3]);
    assert_eq!(array[[0, 1, 2]], 5);
}
