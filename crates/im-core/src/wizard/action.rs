use crate::registration::RegistrationPayload;

/// Side-effects produced by wizard transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    /// Hand the assembled registration to the identity service.
    ///
    /// 将注册信息提交给身份服务。
    SubmitRegistration { payload: RegistrationPayload },
}
