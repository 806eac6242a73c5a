//! Class names, serialVersionUIDs and method signatures of the JMX remote API.

pub const OBJECT_NAME_CLASS: &str = "javax.management.ObjectName";
pub const BYTE_ARRAY_CLASS: &str = "[B";
pub const MARSHALLED_OBJECT_CLASS: &str = "java.rmi.MarshalledObject";
pub const STRING_ARRAY_CLASS: &str = "[Ljava.lang.String;";
pub const OBJECT_ARRAY_CLASS: &str = "[Ljava.lang.Object;";

pub const OBJECT_NAME_UID: i64 = 1081892073854801359;
pub const BYTE_ARRAY_UID: i64 = -5984413125824719648;
pub const MARSHALLED_OBJECT_UID: i64 = 8988374069173025854;
pub const STRING_ARRAY_UID: i64 = -5921575005990323385;
pub const OBJECT_ARRAY_UID: i64 = -8012369246846506644;

/// `hash` field written into every `MarshalledObject` unless configured otherwise.
pub const DEFAULT_MARSHALLED_OBJECT_HASH: i32 = 1919492550;

pub const GET_OBJECT_INSTANCE_SIGNATURE: &str = "getObjectInstance(Ljavax/management/ObjectName;Ljavax/security/auth/Subject;)Ljavax/management/ObjectInstance;";
pub const CREATE_MBEAN_SIGNATURE: &str = "createMBean(Ljava/lang/String;Ljavax/management/ObjectName;Ljavax/security/auth/Subject;)Ljavax/management/ObjectInstance;";
pub const INVOKE_SIGNATURE: &str = "invoke(Ljavax/management/ObjectName;Ljava/lang/String;Ljava/rmi/MarshalledObject;[Ljava/lang/String;Ljavax/security/auth/Subject;)Ljava/lang/Object;";
